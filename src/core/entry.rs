use std::fs;
use std::path::Path;

use serde::Serialize;

use super::address::apply_address;
use super::error::{IndexError, Result};
use super::frontmatter::{parse_metadata, Metadata};
use super::metrics::{load_sibling_metrics, Metrics, MetricsWarning, SiblingMetrics};

/// One record of the generated index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub path: String,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl IndexEntry {
    /// Build the entry for the document at `rel_path` under `root`.
    ///
    /// A malformed sibling `metrics.json` is pushed onto `warnings` and the
    /// entry is returned without metrics.
    pub fn build(root: &Path, rel_path: &str, warnings: &mut Vec<MetricsWarning>) -> Result<Self> {
        let file_path = root.join(rel_path);
        let bytes = fs::read(&file_path).map_err(|source| IndexError::Read {
            path: file_path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let mut metadata = parse_metadata(rel_path, &content)?;

        let folder = file_path.parent().unwrap_or(root);
        let metrics = match load_sibling_metrics(folder)? {
            SiblingMetrics::Absent => None,
            SiblingMetrics::Loaded(metrics) => Some(metrics),
            SiblingMetrics::Malformed(message) => {
                let warning = MetricsWarning {
                    document: rel_path.to_string(),
                    message,
                };
                log::error!("{}", warning);
                warnings.push(warning);
                None
            }
        };

        apply_address(&mut metadata, rel_path);
        log::debug!(
            "indexed {} ({} fields, metrics: {})",
            rel_path,
            metadata.len(),
            metrics.is_some()
        );

        Ok(Self {
            path: rel_path.to_string(),
            metadata,
            metrics,
        })
    }
}
