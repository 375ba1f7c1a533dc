use log;
use std::path::{Path, PathBuf};

pub const DEFAULT_ROOT_DIR: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "project.txt";
pub const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &[".ts", ".vue"];
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "*.pdea*",
    "*node_modules*",
    "*.nuxt*",
    "*.js",
    "*.json",
    "*.yaml",
    "*.ico",
    "*.md",
];

/// Everything a single merge run needs. Built once from the defaults plus
/// any overrides and handed to the merger; never read from or written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    pub root_dir: PathBuf,
    pub output_path: PathBuf,
    /// Glob patterns. Directories are tested on their joined path, files on their bare name.
    pub exclude_patterns: Vec<String>,
    /// File name suffixes. Empty means every file is included.
    pub include_extensions: Vec<String>,
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_include_extensions() -> Vec<String> {
    to_owned_list(DEFAULT_INCLUDE_EXTENSIONS)
}

pub fn default_exclude_patterns() -> Vec<String> {
    to_owned_list(DEFAULT_EXCLUDE_PATTERNS)
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            exclude_patterns: default_exclude_patterns(),
            include_extensions: default_include_extensions(),
        }
    }
}

impl MergeConfig {
    pub fn new(root_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn with_exclude_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_include_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn includes_everything(&self) -> bool {
        self.include_extensions.is_empty()
    }

    pub fn log_summary(&self) {
        log::debug!(
            "Merge config: root={}, output={}",
            self.root_dir.display(),
            self.output_path.display()
        );
        if self.includes_everything() {
            log::debug!("Include extensions: <all files>");
        } else {
            log::debug!("Include extensions: {:?}", self.include_extensions);
        }
        log::debug!("Exclude patterns: {:?}", self.exclude_patterns);
    }
}
