use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{IndexError, Result};
use super::paths::METRICS_FILE_NAME;

/// Participation statistics published next to a delegate document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub combined_participation: String,
    pub poll_participation: String,
    pub exec_participation: String,
    pub communication: String,
    pub start_date: String,
}

/// Outcome of looking for `metrics.json` beside a document.
#[derive(Debug)]
pub enum SiblingMetrics {
    Absent,
    Loaded(Metrics),
    Malformed(String),
}

/// A metrics file that could not be parsed. The entry is still indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsWarning {
    pub document: String,
    pub message: String,
}

impl fmt::Display for MetricsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error parsing metrics file for {}: {}",
            self.document, self.message
        )
    }
}

/// Load `metrics.json` from `dir` when the directory lists one.
///
/// Listing and reading failures are errors; parse failures are reported as
/// [`SiblingMetrics::Malformed`].
pub fn load_sibling_metrics(dir: &Path) -> Result<SiblingMetrics> {
    let entries = fs::read_dir(dir).map_err(|source| IndexError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut listed = false;
    for entry in entries {
        let entry = entry.map_err(|source| IndexError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_name() == METRICS_FILE_NAME {
            listed = true;
            break;
        }
    }
    if !listed {
        return Ok(SiblingMetrics::Absent);
    }

    let path = dir.join(METRICS_FILE_NAME);
    let content = fs::read_to_string(&path).map_err(|source| IndexError::Read {
        path: path.clone(),
        source,
    })?;
    log::debug!("loaded {}", path.display());

    Ok(match serde_json::from_str::<Metrics>(&content) {
        Ok(metrics) => SiblingMetrics::Loaded(metrics),
        Err(e) => SiblingMetrics::Malformed(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
  "combined_participation": "95.00%",
  "poll_participation": "97.50%",
  "exec_participation": "92.10%",
  "communication": "88.00%",
  "start_date": "2023-01-15"
}"#;

    #[test]
    fn absent_without_metrics_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("delegate.md"), "---\n---\n").unwrap();
        assert!(matches!(
            load_sibling_metrics(dir.path()).unwrap(),
            SiblingMetrics::Absent
        ));
    }

    #[test]
    fn loads_valid_metrics() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(METRICS_FILE_NAME), VALID).unwrap();
        match load_sibling_metrics(dir.path()).unwrap() {
            SiblingMetrics::Loaded(m) => {
                assert_eq!(m.combined_participation, "95.00%");
                assert_eq!(m.start_date, "2023-01-15");
            }
            other => panic!("expected metrics, got {:?}", other),
        }
    }

    #[test]
    fn invalid_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(METRICS_FILE_NAME), "{ not json").unwrap();
        assert!(matches!(
            load_sibling_metrics(dir.path()).unwrap(),
            SiblingMetrics::Malformed(_)
        ));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(METRICS_FILE_NAME),
            r#"{"combined_participation": 95}"#,
        )
        .unwrap();
        assert!(matches!(
            load_sibling_metrics(dir.path()).unwrap(),
            SiblingMetrics::Malformed(_)
        ));
    }

    #[test]
    fn warning_names_the_document() {
        let warning = MetricsWarning {
            document: "0xabc/delegate.md".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Error parsing metrics file for 0xabc/delegate.md: expected value at line 1 column 1"
        );
    }
}
