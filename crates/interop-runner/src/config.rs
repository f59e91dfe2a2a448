//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Drive a crypto client through the interop action protocol over stdio.
#[derive(Parser, Debug, Clone)]
#[command(name = "interop-runner", version, about)]
pub struct Args {
    /// Dispatcher that executes parsed actions.
    #[arg(long, value_enum, default_value_t = DispatcherKind::DryRun)]
    pub dispatcher: DispatcherKind,

    /// Read requests from this file instead of stdin.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Dispatchers built into the runner.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherKind {
    /// Answer each action with its canonical URL.
    DryRun,
}
