use clap::Parser;
use std::path::PathBuf;
use treecat_core::DEFAULT_OUTPUT_FILE;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Merge project files into a single text file, filtered by extension and exclude patterns.",
    long_about = "treecat walks the current directory, skips directories and files matching the exclude \npatterns, keeps files ending with one of the include extensions, and writes each file \nprefixed with a '--- <relative path> ---' header into one output file.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  treecat\n  treecat --include .rs .toml --exclude '*target*' --output crate.txt\n  treecat --include --exclude '*.lock'"
)]
pub struct Cli {
    #[arg(
        long,
        num_args = 0..,
        value_name = "EXT",
        help = "File name suffixes to include (default: .ts .vue). Pass the flag with no values to include every file.",
        help_heading = "Filters"
    )]
    pub include: Option<Vec<String>>,

    #[arg(
        long,
        num_args = 0..,
        value_name = "PATTERN",
        help = "Glob patterns for files and directories to skip (default: *.pdea* *node_modules* *.nuxt* *.js *.json *.yaml *.ico *.md). Pass the flag with no values to disable exclusion.",
        help_heading = "Filters"
    )]
    pub exclude: Option<Vec<String>>,

    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_FILE,
        help = "Output file name.",
        help_heading = "Output Control"
    )]
    pub output: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv, -vvv).")]
    pub verbose: u8,

    #[arg(short, long, help = "Silence log messages and warnings.")]
    pub quiet: bool,
}
