mod cli_args;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log;
use std::process;

use cli_args::Cli;
use treecat_core::{AppError, MergeConfig, merge_files};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<AppError>() {
                Some(AppError::Io(_)) => 2,
                Some(AppError::OutputOpen { .. }) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::FileDecode { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::Glob(_)) => 5,
                Some(_) => 1,
                None => 1,
            };
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli) -> Result<()> {
    let config = merge_config_with_cli_overrides(MergeConfig::default(), &cli);
    let report = merge_files(&config).with_context(|| {
        format!(
            "Failed to merge files from {} into {}",
            config.root_dir.display(),
            config.output_path.display()
        )
    })?;
    output::print_merge_summary(&report, &config.output_path)?;
    Ok(())
}

/// Omitted flags keep the defaults; a flag given with no values yields an empty list.
fn merge_config_with_cli_overrides(mut config: MergeConfig, cli: &Cli) -> MergeConfig {
    log::trace!("Applying CLI overrides to config...");

    if let Some(include) = &cli.include {
        config.include_extensions = include.clone();
    }
    if let Some(exclude) = &cli.exclude {
        config.exclude_patterns = exclude.clone();
    }
    config.output_path = cli.output.clone();

    log::trace!("Config after CLI overrides: {:?}", config);
    config
}
