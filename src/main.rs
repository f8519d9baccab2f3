use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{Level, info, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

mod error;
mod import;
mod init;
mod model;
mod pivot;
mod render;
mod report;
mod shell;

use model::Gradebook;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize GitHub Classroom grade exports into a pass/fail spreadsheet", long_about = None)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive import/export menu (default)
    Shell,
    /// Import one or more exports and write the report in one step
    Export {
        /// Classroom export CSV, may be repeated
        #[arg(short, long = "input", required = true)]
        inputs: Vec<PathBuf>,

        /// Report path, defaults to grades-<date>.xlsx
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a sample classroom export CSV
    Init {
        #[arg(default_value = "classroom-export")]
        filename: String,
    },
}

fn default_output() -> PathBuf {
    PathBuf::from(format!("grades-{}.xlsx", Local::now().format("%Y-%m-%d")))
}

fn init_logging(verbose: bool) {
    let fmt = fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(io::stderr);
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();
}

fn export(inputs: &[PathBuf], output: Option<PathBuf>) -> Result<()> {
    let mut gradebook = Gradebook::new();
    for input in inputs {
        let (records, students) = shell::import_into(&mut gradebook, input)
            .with_context(|| format!("failed to import {}", input.display()))?;
        info!(path = %input.display(), records, students, "imported");
    }

    let output = output.unwrap_or_else(default_output);
    let summary = shell::export(&gradebook, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Report written: {} ({} passed, {} failed)",
        summary.path.display(),
        summary.passed,
        summary.failed
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            shell::run(stdin.lock(), io::stdout())?;
        }
        Commands::Export { inputs, output } => export(&inputs, output)?,
        Commands::Init { filename } => {
            let path = init::init_csv(&filename)?;
            println!("Created CSV file: {}", path.display());
        }
    }
    Ok(())
}
