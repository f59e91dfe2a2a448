//! Dispatcher trait for executing actions.
//!
//! The [`Dispatcher`] trait decouples the request loop from the crypto engine
//! being tested. Each platform binding implements it, while the generic
//! [`crate::Runner`] owns parsing and response encoding.

use std::convert::Infallible;

use interop_proto::Action;

/// Executes parsed actions against a crypto engine.
///
/// Called with one action at a time, in request order. Implementations may
/// hold session state between calls.
pub trait Dispatcher {
    /// Engine-specific error type. Its `Display` output becomes the failure
    /// message sent back to the orchestrator.
    type Error: std::error::Error + Send + 'static;

    /// Execute `action` and return its serialized result.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the operation.
    fn dispatch(&mut self, action: Action) -> Result<String, Self::Error>;
}

/// Dispatcher that performs no cryptography.
///
/// Answers every action with its canonical URL, which lets orchestration
/// scripts check that a binding parses and re-encodes requests identically.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRun;

impl Dispatcher for DryRun {
    type Error = Infallible;

    fn dispatch(&mut self, action: Action) -> Result<String, Self::Error> {
        Ok(action.to_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_echoes_canonical_url() {
        let action = Action::GetPrekey { id: 12 };
        assert_eq!(DryRun.dispatch(action), Ok("interop://get-prekey?id=12".to_string()));
    }
}
