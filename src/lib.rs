//! delegates-index library
//!
//! Aggregates per-delegate markdown documents into a single `index.json`.
//!
//! # Modules
//!
//! - `core`: scanning, front matter parsing, metrics loading, index assembly

pub mod core;

// Re-exports for convenience
pub use crate::core::entry::IndexEntry;
pub use crate::core::error::IndexError;
pub use crate::core::frontmatter::Metadata;
pub use crate::core::index::{build_index, check, generate, BuiltIndex, CheckOutcome, IndexOutcome};
pub use crate::core::metrics::{Metrics, MetricsWarning};
pub use crate::core::paths::IndexPaths;
