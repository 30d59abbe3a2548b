//! Error types for the interface model

use std::path::PathBuf;

/// Errors raised while loading or building the interface model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Interface id text is not a GUID
    #[error("invalid interface id '{text}': {source}")]
    InvalidIid {
        text: String,
        #[source]
        source: uuid::Error,
    },

    /// Interface inserted twice into one graph
    #[error("interface '{0}' declared more than once")]
    DuplicateInterface(String),

    /// IO error during source read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON source document
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML source document
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Source file extension not recognised
    #[error("unsupported source format: '{0}'")]
    UnsupportedFormat(String),
}

impl ModelError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
