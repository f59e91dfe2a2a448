//! Request/response loop.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use interop_proto::{Action, Response};
use tracing::{debug, warn};

use crate::{dispatcher::Dispatcher, error::RunnerError};

/// Counters reported when the input is exhausted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank request lines handled.
    pub requests: usize,
    /// Requests answered with a failure.
    pub failures: usize,
}

/// Drives a [`Dispatcher`] from request lines.
#[derive(Debug)]
pub struct Runner<D> {
    dispatcher: D,
}

impl<D: Dispatcher> Runner<D> {
    /// Runner over `dispatcher`.
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    /// Handle one request URL.
    ///
    /// A line that does not parse into an action is answered with a failure;
    /// the parser does not say which part was wrong, so neither does the
    /// message.
    pub fn handle_line(&mut self, line: &str) -> Response {
        let line = line.trim();

        let Some(action) = Action::parse_url(line) else {
            warn!(request = line, "unrecognized action");
            return Response::failure(format!("unrecognized action: {line}"));
        };

        let command = action.command();
        debug!(%command, "dispatching");

        let response = Response::from(self.dispatcher.dispatch(action));
        if let Response::Failure(message) = &response {
            warn!(%command, %message, "action failed");
        }
        response
    }

    /// Answer every non-blank line of `input` on `output` until EOF.
    ///
    /// Each response is flushed before the next request is read, so the
    /// orchestrator can run the exchange in lockstep.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::default();

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line);
            summary.requests += 1;
            if !response.is_success() {
                summary.failures += 1;
            }

            writeln!(output, "{}", response.to_json()?)?;
            output.flush()?;
        }

        Ok(summary)
    }

    /// Consume the runner, returning the dispatcher.
    pub fn into_inner(self) -> D {
        self.dispatcher
    }
}

/// Open the request source: the file at `path`, or stdin.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, RunnerError> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}
