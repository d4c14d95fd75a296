use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an index run.
///
/// Malformed metrics files are not represented here: they are reported as
/// [`MetricsWarning`](super::metrics::MetricsWarning) and the entry is kept.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to walk {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front matter in {document}: {source}")]
    Frontmatter {
        document: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("front matter in {document} is not a mapping")]
    FrontmatterShape { document: String },

    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
