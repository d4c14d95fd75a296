use std::fs;
use std::path::{Path, PathBuf};

use super::collate::locale_compare;
use super::entry::IndexEntry;
use super::error::{IndexError, Result};
use super::metrics::MetricsWarning;
use super::paths::IndexPaths;
use super::scan::collect_documents;

/// Entries for every document under a root, plus recoverable problems.
#[derive(Debug, Default)]
pub struct BuiltIndex {
    pub entries: Vec<IndexEntry>,
    pub warnings: Vec<MetricsWarning>,
}

impl BuiltIndex {
    pub fn render(&self) -> Result<String> {
        render_index(&self.entries)
    }
}

#[derive(Debug)]
pub enum IndexOutcome {
    /// The root does not exist; nothing was written.
    RootMissing { root: PathBuf },
    /// No documents matched; an empty array was written.
    NoDocuments { output: PathBuf },
    Written {
        output: PathBuf,
        entries: usize,
        warnings: Vec<MetricsWarning>,
    },
}

#[derive(Debug)]
pub enum CheckOutcome {
    RootMissing { root: PathBuf },
    UpToDate { output: PathBuf, entries: usize },
    Stale { output: PathBuf, entries: usize },
}

/// Build and sort all entries under `root`. Nothing is written.
pub fn build_index(root: &Path) -> Result<BuiltIndex> {
    let documents = collect_documents(root)?;
    log::debug!("found {} documents under {}", documents.len(), root.display());

    let mut built = BuiltIndex {
        entries: Vec::with_capacity(documents.len()),
        warnings: Vec::new(),
    };
    for rel_path in &documents {
        let entry = IndexEntry::build(root, rel_path, &mut built.warnings)?;
        built.entries.push(entry);
    }

    sort_entries(&mut built.entries);
    Ok(built)
}

pub fn sort_entries(entries: &mut [IndexEntry]) {
    entries.sort_by(|a, b| locale_compare(&a.path, &b.path));
}

/// Serialize entries as a two-space indented JSON array.
pub fn render_index(entries: &[IndexEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

pub fn write_index(output: &Path, contents: &str) -> Result<()> {
    fs::write(output, contents).map_err(|source| IndexError::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// Regenerate the index file described by `paths`.
pub fn generate(paths: &IndexPaths) -> Result<IndexOutcome> {
    if !paths.root_exists() {
        return Ok(IndexOutcome::RootMissing {
            root: paths.root.clone(),
        });
    }

    let built = build_index(&paths.root)?;
    let contents = built.render()?;
    write_index(&paths.output, &contents)?;

    if built.entries.is_empty() {
        return Ok(IndexOutcome::NoDocuments {
            output: paths.output.clone(),
        });
    }

    Ok(IndexOutcome::Written {
        output: paths.output.clone(),
        entries: built.entries.len(),
        warnings: built.warnings,
    })
}

/// Compare the index that would be generated with the file on disk.
pub fn check(paths: &IndexPaths) -> Result<(CheckOutcome, Vec<MetricsWarning>)> {
    if !paths.root_exists() {
        let outcome = CheckOutcome::RootMissing {
            root: paths.root.clone(),
        };
        return Ok((outcome, Vec::new()));
    }

    let built = build_index(&paths.root)?;
    let expected = built.render()?;
    let output = paths.output.clone();
    let entries = built.entries.len();

    let current = match fs::read_to_string(&paths.output) {
        Ok(current) => Some(current),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(IndexError::Read {
                path: paths.output.clone(),
                source,
            })
        }
    };

    let outcome = if current.as_deref() == Some(expected.as_str()) {
        CheckOutcome::UpToDate { output, entries }
    } else {
        CheckOutcome::Stale { output, entries }
    };
    Ok((outcome, built.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn missing_root_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::from_root(dir.path().join("missing"));

        let outcome = generate(&paths).unwrap();
        assert!(matches!(outcome, IndexOutcome::RootMissing { .. }));
        assert!(!paths.output.exists());
    }

    #[test]
    fn empty_root_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", "# Delegates");
        let paths = IndexPaths::from_root(dir.path().to_path_buf());

        let outcome = generate(&paths).unwrap();
        assert!(matches!(outcome, IndexOutcome::NoDocuments { .. }));
        assert_eq!(fs::read_to_string(&paths.output).unwrap(), "[]");
    }

    #[test]
    fn entries_are_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b/doc.md", "---\nname: B\n---\n");
        write(dir.path(), "a/doc.md", "---\nname: A\n---\n");
        write(dir.path(), "C/doc.md", "---\nname: C\n---\n");

        let built = build_index(dir.path()).unwrap();
        let paths: Vec<&str> = built.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a/doc.md", "b/doc.md", "C/doc.md"]);
    }

    #[test]
    fn generated_file_is_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "0xabc/delegate.md", "---\nname: Alice\n---\n");
        let paths = IndexPaths::from_root(dir.path().to_path_buf());

        generate(&paths).unwrap();
        let raw = fs::read_to_string(&paths.output).unwrap();
        let expected = "[\n  {\n    \"path\": \"0xabc/delegate.md\",\n    \"metadata\": {\n      \"name\": \"Alice\",\n      \"address\": \"0xabc\"\n    }\n  }\n]";
        assert_eq!(raw, expected);
    }

    #[test]
    fn malformed_metrics_do_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad/delegate.md", "---\nname: Bad\n---\n");
        write(dir.path(), "bad/metrics.json", "not json");
        write(dir.path(), "good/delegate.md", "---\nname: Good\n---\n");
        let paths = IndexPaths::from_root(dir.path().to_path_buf());

        match generate(&paths).unwrap() {
            IndexOutcome::Written { entries, warnings, .. } => {
                assert_eq!(entries, 2);
                assert_eq!(warnings.len(), 1);
                assert_eq!(warnings[0].document, "bad/delegate.md");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        let index = read_json(&paths.output);
        assert!(index[0].get("metrics").is_none());
        assert_eq!(index[1]["metadata"], json!({ "name": "Good" }));
    }

    #[test]
    fn fatal_error_keeps_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.json", "[\"previous\"]");
        write(dir.path(), "eve/delegate.md", "---\nname: [oops\n---\n");
        let paths = IndexPaths::from_root(dir.path().to_path_buf());

        assert!(generate(&paths).is_err());
        assert_eq!(fs::read_to_string(&paths.output).unwrap(), "[\"previous\"]");
    }

    #[test]
    fn regeneration_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "0x1/delegate.md", "---\nname: One\ntags: [a, b]\n---\n");
        write(dir.path(), "two/delegate.md", "---\nname: Two\n---\n");
        let paths = IndexPaths::from_root(dir.path().to_path_buf());

        generate(&paths).unwrap();
        let first = fs::read(&paths.output).unwrap();
        generate(&paths).unwrap();
        assert_eq!(first, fs::read(&paths.output).unwrap());
    }

    #[test]
    fn check_detects_stale_index() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "alice/delegate.md", "---\nname: Alice\n---\n");
        let paths = IndexPaths::from_root(dir.path().to_path_buf());

        let (outcome, _) = check(&paths).unwrap();
        assert!(matches!(outcome, CheckOutcome::Stale { .. }));

        generate(&paths).unwrap();
        let (outcome, _) = check(&paths).unwrap();
        assert!(matches!(outcome, CheckOutcome::UpToDate { entries: 1, .. }));

        write(dir.path(), "alice/delegate.md", "---\nname: Alicia\n---\n");
        let (outcome, _) = check(&paths).unwrap();
        assert!(matches!(outcome, CheckOutcome::Stale { .. }));
    }
}
