//! Runner errors.

use interop_proto::ResponseError;
use thiserror::Error;

/// Errors that stop the request loop.
///
/// Per-request problems (unparseable lines, dispatcher failures) never end up
/// here; they are answered with a failure response instead.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Reading requests or writing responses failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be encoded.
    #[error(transparent)]
    Response(#[from] ResponseError),
}
