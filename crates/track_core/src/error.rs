use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the ingestion layer.
///
/// Field-level problems inside a document never show up here; they become
/// missing values in the normalized table.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl IngestError {
    /// The file the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            IngestError::FileAccess { path, .. }
            | IngestError::Decode { path, .. }
            | IngestError::Csv { path, .. }
            | IngestError::Config { path, .. } => Some(path),
            IngestError::Pattern(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("pitch type {0} needs both pitch_length and pitch_width")]
    MissingDimensions(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
