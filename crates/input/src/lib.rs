//! Host input mapped to actions.
//!
//! # Invariants
//! - Hosts translate raw keys or buttons into [`Action`]s; nothing downstream
//!   sees key codes.
//! - One-shot actions go through [`Action::apply`]; held actions are folded
//!   once per frame with [`controls_from_held`].

pub mod action;

pub use action::{Action, InputError, controls_from_held};
