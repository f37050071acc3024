use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hermit operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot resolve relative paths without an importer")]
    RelativeWithoutImporter,

    #[error("Could not resolve import '{specifier}' from '{importer}'")]
    UnresolvedImport { specifier: String, importer: String },

    #[error("bundle warning treated as fatal: {0}")]
    FatalWarning(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
