use anyhow::{Context, Result};
use colored::*;
use std::io::{self, Write};
use std::path::Path;
use treecat_core::MergeReport;

pub fn print_merge_summary(report: &MergeReport, output_path: &Path) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_merge_summary(&mut handle, report, output_path).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn write_merge_summary<W: Write>(
    out: &mut W,
    report: &MergeReport,
    output_path: &Path,
) -> io::Result<()> {
    writeln!(out, "{}", "Added files:".green().bold())?;
    for file in &report.files {
        writeln!(out, "{}", file)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "Total files added:".green(),
        report.files.len().to_string().cyan()
    )?;
    if !report.skipped.is_empty() {
        writeln!(
            out,
            "{} {}",
            "Files skipped due to errors:".yellow(),
            report.skipped.len().to_string().yellow()
        )?;
    }
    writeln!(
        out,
        "{} {}",
        "Result saved to file:".green(),
        output_path.display().to_string().blue()
    )
}
