mod cli;
mod config;
mod domain;
mod error;
mod infra;
mod report;
mod workflows;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{ConfigFile, Settings};
use domain::models::RunSummary;
use error::MatchError;
use infra::fs::DiskFileSystem;
use report::{OutputFormat, Reporter};
use workflows::renamer;

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let file = ConfigFile::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, file);
    tracing::debug!(?settings, "Resolved settings");

    let mut reporter = report::stdout_reporter(settings.format);
    let outcome = renamer::run(&settings, &DiskFileSystem, reporter.as_mut());
    finish_run(outcome, settings.format, reporter.as_mut(), &mut io::stdout())
}

/// Hand the outcome of a run to the user. An `Err` here means exit status 1.
///
/// A missing pattern and the no-input aborts are ordinary endings; only
/// configuration errors such as a malformed regex fail the process.
fn finish_run(
    outcome: Result<RunSummary, MatchError>,
    format: OutputFormat,
    reporter: &mut dyn Reporter,
    help: &mut dyn Write,
) -> Result<()> {
    match outcome {
        Ok(summary) => reporter.finish(&summary)?,
        Err(e @ MatchError::MissingPattern) => match format {
            OutputFormat::Text => {
                writeln!(help, "{e}\n")?;
                writeln!(help, "{}", Cli::command().render_help())?;
                help.flush()?;
            }
            OutputFormat::Json => reporter.abort(&e)?,
        },
        Err(e) if e.is_no_input() => reporter.abort(&e)?,
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
