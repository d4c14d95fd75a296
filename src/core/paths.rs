use std::path::{Path, PathBuf};

/// File name of the generated index, written at the scan root.
pub const INDEX_FILE_NAME: &str = "index.json";

/// Sibling file holding per-delegate participation metrics.
pub const METRICS_FILE_NAME: &str = "metrics.json";

/// Globs excluded from the scan, matched against forward-slash relative paths.
pub const IGNORE_PATTERNS: &[&str] = &[
    "README.md",
    "**/README.md",
    "meta/**",
    "**/meta/**",
    "templates/**",
    "**/templates/**",
];

pub struct IndexPaths {
    pub root: PathBuf,
    pub output: PathBuf,
}

impl IndexPaths {
    pub fn new() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_root(root)
    }

    pub fn from_root(root: PathBuf) -> Self {
        Self {
            output: root.join(INDEX_FILE_NAME),
            root,
        }
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    pub fn root_exists(&self) -> bool {
        self.root.exists()
    }
}

impl Default for IndexPaths {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize path separators to forward slashes.
pub fn normalize_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
