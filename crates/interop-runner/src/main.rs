//! Interop runner binary.
//!
//! Responses go to stdout, logs to stderr.

use std::{io, process::ExitCode};

use clap::Parser;
use interop_runner::{Args, DispatcherKind, DryRun, RunSummary, Runner, RunnerError, open_input};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match run(&args) {
        Ok(summary) => {
            info!(requests = summary.requests, failures = summary.failures, "input exhausted");
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!(error = %e, "runner stopped");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> Result<RunSummary, RunnerError> {
    let input = open_input(args.input.as_deref())?;
    let output = io::stdout().lock();

    match args.dispatcher {
        DispatcherKind::DryRun => {
            info!("using dry-run dispatcher");
            Runner::new(DryRun).run(input, output)
        },
    }
}
