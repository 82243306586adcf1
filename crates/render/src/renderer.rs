use std::fmt::Write as _;

use demoscape_kernel::FlightState;
use demoscape_terrain::Extrema;
use glam::Vec3;

use crate::buffers::MeshBuffers;
use crate::instance::ParticleInstance;

/// Camera configuration for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_flight(&FlightState::default())
    }
}

impl RenderView {
    /// Look from the plane along its forward direction, with its local +Z up.
    pub fn from_flight(flight: &FlightState) -> Self {
        Self {
            eye: flight.position,
            target: flight.position + flight.forward(),
            up: flight.orientation * Vec3::Z,
            fov_degrees: 60.0,
        }
    }
}

/// Everything a renderer may read for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub terrain: Option<&'a MeshBuffers>,
    /// Elevation range used for height coloring.
    pub elevation: Option<Extrema>,
    pub particles: &'a [ParticleInstance],
    pub view: RenderView,
}

/// Renderer-agnostic interface.
///
/// A renderer only reads the frame; simulation state stays with its owner.
pub trait Renderer {
    type Output;

    fn render(&self, frame: &Frame<'_>) -> Self::Output;
}

/// Human-readable dump of a frame, for the CLI and tests.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// Maximum number of particles listed individually.
    pub max_listed: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { max_listed: 16 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame<'_>) -> String {
        let mut out = String::new();
        let v = &frame.view;
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0}",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z, v.fov_degrees
        );

        match frame.terrain {
            Some(t) => {
                let _ = write!(
                    out,
                    "Terrain: divisions={} vertices={} faces={} edges={}",
                    t.divisions,
                    t.vertex_count(),
                    t.face_count(),
                    t.edge_count()
                );
                if let Some(e) = frame.elevation {
                    let _ = write!(out, " z=[{:.4}, {:.4}]", e.min_z, e.max_z);
                }
                out.push('\n');
            }
            None => out.push_str("Terrain: none\n"),
        }

        let _ = writeln!(out, "Particles: {}", frame.particles.len());
        for p in frame.particles.iter().take(self.max_listed) {
            let [x, y, z] = p.position;
            let _ = writeln!(out, "  pos=({x:.3}, {y:.3}, {z:.3}) r={:.2}", p.radius);
        }
        let hidden = frame.particles.len().saturating_sub(self.max_listed);
        if hidden > 0 {
            let _ = writeln!(out, "  ... {hidden} more");
        }
        out
    }
}
