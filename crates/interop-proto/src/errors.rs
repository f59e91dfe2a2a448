//! Error types for the fallible edges of the protocol.
//!
//! Action parsing itself never produces one of these; it collapses every
//! failure into `None`. These cover request decomposition and response
//! decoding.

use thiserror::Error;

/// Errors turning a URL string into a [`crate::Request`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The text is not a URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL has no host, so there is no command selector.
    #[error("request url has no command selector: {url}")]
    MissingSelector {
        /// The offending URL
        url: String,
    },

    /// The selector is not valid UTF-8 after percent-decoding.
    #[error("command selector is not valid UTF-8: {component}")]
    InvalidEncoding {
        /// The raw selector text
        component: String,
    },

    /// A tab or line break inside the URL, which URL parsing would drop.
    #[error("request url contains a tab or line break: {url:?}")]
    EmbeddedWhitespace {
        /// The offending URL
        url: String,
    },
}

/// Errors converting a [`crate::Response`] to or from JSON.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// Not a single-key `success`/`failure` JSON object with a string value.
    #[error("malformed response json: {0}")]
    Json(#[from] serde_json::Error),
}
