//! Line-oriented driver for the interop action protocol.
//!
//! Reads one request URL per line, turns it into an [`interop_proto::Action`],
//! hands the action to a [`Dispatcher`], and writes one JSON
//! [`interop_proto::Response`] per line.
//!
//! # Components
//!
//! - [`Dispatcher`]: seam to the crypto engine under test
//! - [`DryRun`]: dispatcher that only exercises the protocol
//! - [`Runner`]: request/response loop
//! - [`Args`]: command-line configuration

#![forbid(unsafe_code)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod runner;

pub use config::{Args, DispatcherKind};
pub use dispatcher::{Dispatcher, DryRun};
pub use error::RunnerError;
pub use runner::{RunSummary, Runner, open_input};
