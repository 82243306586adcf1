use std::path::PathBuf;

/// Errors from buffer checks and export.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{buffer} buffer has {len} elements, expected a multiple of {stride}")]
    BadStride {
        buffer: &'static str,
        len: usize,
        stride: usize,
    },

    #[error("{buffer} buffer has {len} elements, expected {expected}")]
    LengthMismatch {
        buffer: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("{buffer} buffer references vertex {index}, but only {vertex_count} exist")]
    IndexOutOfRange {
        buffer: &'static str,
        index: u32,
        vertex_count: usize,
    },
}
