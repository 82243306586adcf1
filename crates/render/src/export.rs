use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::instance::ParticleInstance;

/// One recorded simulation frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameExport {
    pub frame: u64,
    pub dt: f32,
    pub particles: Vec<ParticleInstance>,
}

/// Write `value` as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote json export");
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, RenderError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeshBuffers;
    use demoscape_common::Bounds2;
    use demoscape_terrain::build_grid;

    #[test]
    fn mesh_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("mesh.json");
        let buffers = MeshBuffers::from_mesh(&build_grid(3, Bounds2::centered(2.0)).unwrap());

        write_json(&path, &buffers).unwrap();
        let back: MeshBuffers = read_json(&path).unwrap();
        assert_eq!(back, buffers);
        back.validate().unwrap();
    }

    #[test]
    fn frames_export_as_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.json");
        let frames = vec![FrameExport {
            frame: 1,
            dt: 0.008,
            particles: vec![ParticleInstance {
                position: [0.0, 1.0, 2.0],
                color: [1.0, 0.0, 0.0],
                radius: 0.3,
            }],
        }];
        write_json(&path, &frames).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw[0]["frame"], 1);
        assert_eq!(raw[0]["particles"][0]["position"][2], 2.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = read_json::<FrameExport>(&missing).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_json::<MeshBuffers>(&path).unwrap_err();
        assert!(matches!(err, RenderError::Json(_)));
    }
}
