pub mod config;
pub mod error;
pub mod merge;
pub mod patterns;

pub use config::{
    DEFAULT_EXCLUDE_PATTERNS, DEFAULT_INCLUDE_EXTENSIONS, DEFAULT_OUTPUT_FILE, DEFAULT_ROOT_DIR,
    MergeConfig, default_exclude_patterns, default_include_extensions,
};
pub use error::{AppError, Result};
pub use merge::{MergeReport, MergedFile, Merger, SkippedFile, merge_files};
pub use patterns::{ExcludePatternSet, IncludeExtensionSet, matches};
