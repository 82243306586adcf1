use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::TerrainConfig;
use crate::fault::shape_terrain;
use crate::grid::build_grid;
use crate::mesh::{Mesh, TerrainError};
use crate::normals::calculate_normals;

/// Build, shape and light a terrain mesh, drawing fault lines from `rng`.
pub fn generate<R: Rng + ?Sized>(
    config: &TerrainConfig,
    rng: &mut R,
) -> Result<Mesh, TerrainError> {
    let span = tracing::info_span!("terrain_generate", divisions = config.divisions);
    let _span = span.entered();
    config.validate()?;

    let mut mesh = build_grid(config.divisions, config.bounds)?;
    shape_terrain(
        &mut mesh,
        config.faults,
        config.initial_delta,
        config.decay,
        config.falloff_radius,
        rng,
    );
    tracing::debug!(faults = config.faults, "terrain sculpted");

    calculate_normals(&mut mesh);
    tracing::info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "terrain generated"
    );
    Ok(mesh)
}

/// [`generate`] with a ChaCha8 stream seeded from `config.seed`.
pub fn generate_seeded(config: &TerrainConfig) -> Result<Mesh, TerrainError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    generate(config, &mut rng)
}
