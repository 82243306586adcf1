use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use demoscape_common::Bounds2;
use demoscape_input::{Action, controls_from_held};
use demoscape_kernel::{FlightState, LogoState, Simulation, SimulationConfig};
use demoscape_render::{
    DebugTextRenderer, Frame, FrameExport, MeshBuffers, RenderView, Renderer, particle_instances,
    read_json, write_json,
};
use demoscape_terrain::{ElevationCache, TerrainConfig, generate_seeded};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "demoscape-cli", about = "Terrain and particle chamber demo tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default configurations
    Info,
    /// Generate fault-formation terrain
    Terrain {
        /// JSON file with a terrain configuration; flags override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Grid cells along each axis
        #[arg(short, long)]
        divisions: Option<u32>,
        /// Half width of the square terrain bounds
        #[arg(long)]
        half_extent: Option<f32>,
        /// Number of fault passes
        #[arg(short, long)]
        faults: Option<u32>,
        /// Height change of the first fault
        #[arg(long)]
        delta: Option<f32>,
        /// Per-pass decay exponent
        #[arg(long)]
        decay: Option<f32>,
        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Write mesh buffers as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run the particle chamber for a number of frames
    Simulate {
        /// JSON file with a simulation configuration; flags override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Particles spawned before the first frame
        #[arg(short, long, default_value = "10")]
        particles: usize,
        /// Number of frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Host frame interval in milliseconds
        #[arg(long, default_value = "16.0")]
        frame_ms: f64,
        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Write every frame's particle instances as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Fly the camera with held controls
    Flight {
        /// Number of frames to fly
        #[arg(short, long, default_value = "100")]
        frames: u64,
        /// Controls held every frame (pitch-up, roll-left, speed-up, ...)
        #[arg(long = "hold")]
        held: Vec<Action>,
        /// Reset the plane after this frame
        #[arg(long)]
        reset_at: Option<u64>,
        /// Print the camera every N frames
        #[arg(long, default_value = "10")]
        every: u64,
    },
    /// Run the dancing logo animation
    Logo {
        /// Frames to run
        #[arg(long, default_value = "500")]
        frames: u64,
        /// Speed slider value, degrees per second for the block
        #[arg(long, default_value = "50")]
        speed: f32,
        /// Frame interval in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f32,
        /// Show the bouncing ball instead of the block
        #[arg(long)]
        ball: bool,
        /// Print the state every N frames
        #[arg(long, default_value = "50")]
        every: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("demoscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "terrain defaults: {}",
                serde_json::to_string(&TerrainConfig::default())?
            );
            println!(
                "simulation defaults: {}",
                serde_json::to_string(&SimulationConfig::default())?
            );
        }
        Commands::Terrain {
            config,
            divisions,
            half_extent,
            faults,
            delta,
            decay,
            seed,
            out,
        } => {
            let mut cfg: TerrainConfig = match config {
                Some(path) => read_json(&path)
                    .with_context(|| format!("loading terrain config {}", path.display()))?,
                None => TerrainConfig::default(),
            };
            if let Some(d) = divisions {
                cfg.divisions = d;
            }
            if let Some(h) = half_extent {
                cfg.bounds = Bounds2::centered(h);
            }
            if let Some(f) = faults {
                cfg.faults = f;
            }
            if let Some(d) = delta {
                cfg.initial_delta = d;
            }
            if let Some(d) = decay {
                cfg.decay = d;
            }
            if let Some(s) = seed {
                cfg.seed = s;
            }

            let mesh = generate_seeded(&cfg)?;
            let mut cache = ElevationCache::new();
            let buffers = MeshBuffers::from_mesh(&mesh);
            tracing::info!(
                divisions = cfg.divisions,
                faults = cfg.faults,
                vertices = buffers.vertex_count(),
                "terrain ready"
            );
            let frame = Frame {
                terrain: Some(&buffers),
                elevation: cache.get(&mesh),
                particles: &[],
                view: RenderView::default(),
            };
            print!("{}", DebugTextRenderer::new().render(&frame));

            if let Some(path) = out {
                write_json(&path, &buffers)?;
                tracing::info!(path = %path.display(), "terrain exported");
                println!("Wrote {}", path.display());
            }
        }
        Commands::Simulate {
            config,
            particles,
            frames,
            frame_ms,
            seed,
            out,
        } => {
            let mut cfg: SimulationConfig = match config {
                Some(path) => read_json(&path)
                    .with_context(|| format!("loading simulation config {}", path.display()))?,
                None => SimulationConfig::default(),
            };
            if let Some(s) = seed {
                cfg.seed = s;
            }
            if !(frame_ms.is_finite() && frame_ms > 0.0) {
                anyhow::bail!("frame interval must be positive, got {frame_ms}");
            }

            let mut sim = Simulation::new(cfg)?;
            for _ in 0..particles {
                sim.spawn_particle();
            }

            let mut recorded = Vec::new();
            let mut collisions = 0;
            for i in 0..frames {
                let report = sim.advance(i as f64 * frame_ms);
                collisions += report.collisions;
                if out.is_some() {
                    recorded.push(FrameExport {
                        frame: report.frame,
                        dt: report.dt,
                        particles: particle_instances(&sim),
                    });
                }
            }

            let summary = sim.summary();
            tracing::info!(
                frames,
                collisions,
                particles = sim.len(),
                "simulation finished"
            );
            println!("{summary}");
            println!("Collisions: {collisions}");
            let instances = particle_instances(&sim);
            let frame = Frame {
                terrain: None,
                elevation: None,
                particles: &instances,
                view: RenderView::default(),
            };
            print!("{}", DebugTextRenderer::new().render(&frame));

            if let Some(path) = out {
                write_json(&path, &recorded)?;
                let count = recorded.len();
                tracing::info!(path = %path.display(), frames = count, "frames exported");
                println!("Wrote {count} frames to {}", path.display());
            }
        }
        Commands::Flight {
            frames,
            held,
            reset_at,
            every,
        } => {
            let controls = controls_from_held(&held);
            let mut flight = FlightState::new();
            let every = every.max(1);
            for i in 1..=frames {
                flight.advance(&controls);
                if reset_at == Some(i) {
                    flight.reset();
                }
                if i % every == 0 || i == frames {
                    let v = RenderView::from_flight(&flight);
                    let e = v.eye;
                    let f = v.target - v.eye;
                    println!(
                        "frame {i}: eye=({:.3}, {:.3}, {:.3}) forward=({:.3}, {:.3}, {:.3}) speed={:.3}",
                        e.x, e.y, e.z, f.x, f.y, f.z, flight.speed
                    );
                }
            }
        }
        Commands::Logo {
            frames,
            speed,
            frame_ms,
            ball,
            every,
        } => {
            if !(frame_ms.is_finite() && frame_ms > 0.0) {
                anyhow::bail!("frame interval must be positive, got {frame_ms}");
            }
            let mut logo = LogoState::new();
            if ball {
                logo.toggle_mode();
            }
            let dt = frame_ms / 1000.0;
            let every = every.max(1);
            for i in 1..=frames {
                logo.advance(dt, speed);
                if i % every == 0 || i == frames {
                    let o = logo.path_offset();
                    let c = logo.ball.center;
                    println!(
                        "frame {i}: angle={:.2} scale={:.3} offset=({:.3}, {:.3}) ball=({:.3}, {:.3})",
                        logo.angle_deg, logo.scale, o.x, o.y, c.x, c.y
                    );
                }
            }
            tracing::info!(frames, mode = ?logo.mode, "logo animation finished");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_held_actions() {
        let cli = Cli::try_parse_from([
            "demoscape-cli",
            "flight",
            "--hold",
            "pitch-up",
            "--hold",
            "speed-up",
        ])
        .unwrap();
        match cli.command {
            Commands::Flight { held, .. } => {
                assert_eq!(held, vec![Action::PitchUp, Action::SpeedUp]);
            }
            _ => panic!("expected flight"),
        }
    }

    #[test]
    fn rejects_unknown_action() {
        let args = ["demoscape-cli", "flight", "--hold", "loop"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn parses_logo_options() {
        let args = ["demoscape-cli", "logo", "--ball", "--speed", "80"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Logo {
                ball,
                speed,
                frames,
                ..
            } => {
                assert!(ball);
                assert_eq!(speed, 80.0);
                assert_eq!(frames, 500);
            }
            _ => panic!("expected logo"),
        }
    }
}
