use crate::config::MergeConfig;
use crate::error::{AppError, Result};
use crate::patterns::{ExcludePatternSet, IncludeExtensionSet};
use log;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const HEADER_PREFIX: &str = "--- ";
pub const HEADER_SUFFIX: &str = " ---";
pub const RECORD_TERMINATOR: &str = "\n\n";

/// One file's block in the merged output.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedFile {
    pub relative_path: String,
    pub content: String,
}

impl MergedFile {
    pub fn header(&self) -> String {
        format!("{}{}{}", HEADER_PREFIX, self.relative_path, HEADER_SUFFIX)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.header())?;
        writer.write_all(self.content.as_bytes())?;
        writer.write_all(RECORD_TERMINATOR.as_bytes())
    }
}

#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: AppError,
}

#[derive(Debug, Default)]
pub struct MergeReport {
    /// Relative paths in the order they were written.
    pub files: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl MergeReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Merger {
    root_dir: PathBuf,
    excludes: ExcludePatternSet,
    includes: IncludeExtensionSet,
}

impl Merger {
    pub fn new(config: &MergeConfig) -> Result<Self> {
        log::trace!("Building exclude and include sets...");
        Ok(Self {
            root_dir: config.root_dir.clone(),
            excludes: ExcludePatternSet::new(&config.exclude_patterns)?,
            includes: IncludeExtensionSet::new(&config.include_extensions),
        })
    }

    /// Walks the root and appends every qualifying file to `writer`.
    ///
    /// `skip_path` is a canonical path that must never be merged, normally the
    /// output file itself. Unreadable or non-UTF-8 files are logged and recorded
    /// in the report; only write failures abort the walk.
    pub fn merge_into<W: Write>(
        &self,
        writer: &mut W,
        skip_path: Option<&Path>,
    ) -> Result<MergeReport> {
        let mut report = MergeReport::default();

        if !self.root_dir.is_dir() {
            log::warn!(
                "Root {} is missing or not a directory, nothing to merge.",
                self.root_dir.display()
            );
            return Ok(report);
        }

        // Stable sort: files keep their reported order and come before subdirectories,
        // so a directory's files are written before anything beneath it.
        let walker = WalkDir::new(&self.root_dir)
            .follow_links(false)
            .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
            .into_iter()
            .filter_entry(|entry| self.should_descend(entry));

        log::info!("Walking directory: {}", self.root_dir.display());
        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Error walking directory: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 || is_dir_like(&entry) {
                continue;
            }
            self.process_file(&entry, writer, skip_path, &mut report)?;
        }

        log::info!(
            "Directory walk complete. Merged {} files, skipped {}.",
            report.files.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn should_descend(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        if self.excludes.is_excluded(entry.path()) {
            log::trace!("Pruning excluded directory: {}", entry.path().display());
            return false;
        }
        true
    }

    fn process_file<W: Write>(
        &self,
        entry: &DirEntry,
        writer: &mut W,
        skip_path: Option<&Path>,
        report: &mut MergeReport,
    ) -> Result<()> {
        let path = entry.path();
        let file_name = entry.file_name();

        if self.excludes.is_excluded(file_name) {
            log::trace!("Excluding file by pattern: {}", path.display());
            return Ok(());
        }
        if !self.includes.includes(&file_name.to_string_lossy()) {
            log::trace!("Excluding file by extension: {}", path.display());
            return Ok(());
        }
        if skip_path.is_some_and(|skip| fs::canonicalize(path).is_ok_and(|p| p == skip)) {
            log::debug!("Skipping output file found under root: {}", path.display());
            return Ok(());
        }

        let relative_path = pathdiff::diff_paths(path, &self.root_dir)
            .unwrap_or_else(|| path.to_path_buf())
            .to_string_lossy()
            .into_owned();

        match read_text(path) {
            Ok(content) => {
                let record = MergedFile {
                    relative_path,
                    content,
                };
                record.write_to(writer)?;
                log::trace!("Merged: {}", record.relative_path);
                report.files.push(record.relative_path);
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("Error processing file {}: {}", path.display(), e);
                report.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    error: e,
                });
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

/// Directories and links to directories are never merged.
fn is_dir_like(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| AppError::FileDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs a full merge: validates the patterns, truncates the output file and
/// writes every qualifying file under the root into it.
///
/// The output file is never merged into itself, even when it lies under the
/// root and passes the include and exclude filters (e.g. `--output out.ts`).
pub fn merge_files(config: &MergeConfig) -> Result<MergeReport> {
    config.log_summary();
    let merger = Merger::new(config)?;

    let output_path = config.output_path();
    let file = File::create(output_path).map_err(|source| AppError::OutputOpen {
        path: output_path.to_path_buf(),
        source,
    })?;
    let output_identity = fs::canonicalize(output_path).ok();
    let mut writer = BufWriter::new(file);

    let to_write_error = |e: AppError| match e {
        AppError::Io(source) => AppError::FileWrite {
            path: output_path.to_path_buf(),
            source,
        },
        other => other,
    };

    let report = merger
        .merge_into(&mut writer, output_identity.as_deref())
        .map_err(to_write_error)?;
    writer.flush().map_err(AppError::from).map_err(to_write_error)?;
    log::debug!("Output written to {}", output_path.display());
    Ok(report)
}
