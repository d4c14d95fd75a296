use std::path::Path;

use glob::{MatchOptions, Pattern};
use lazy_static::lazy_static;
use walkdir::{DirEntry, WalkDir};

use super::error::{IndexError, Result};
use super::paths::{normalize_path, IGNORE_PATTERNS};

lazy_static! {
    static ref IGNORED: Vec<Pattern> = IGNORE_PATTERNS
        .iter()
        .map(|p| Pattern::new(p).unwrap())
        .collect();
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

pub fn is_ignored(rel_path: &str) -> bool {
    IGNORED
        .iter()
        .any(|p| p.matches_with(rel_path, MATCH_OPTIONS))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

fn is_markdown(path: &Path) -> bool {
    path.extension().map(|e| e == "md").unwrap_or(false)
}

/// Collect markdown documents under `root` as forward-slash relative paths.
///
/// Hidden entries and ignored paths are skipped. The result is sorted by file
/// name per directory; callers needing a collation order sort again.
pub fn collect_documents(root: &Path) -> Result<Vec<String>> {
    let mut documents = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|source| IndexError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !is_markdown(path) || !path.is_file() {
            continue;
        }

        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let rel = normalize_path(rel);
        if is_ignored(&rel) {
            log::debug!("skipping ignored document {}", rel);
            continue;
        }
        documents.push(rel);
    }

    Ok(documents)
}
