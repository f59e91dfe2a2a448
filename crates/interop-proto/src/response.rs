//! Response envelope.
//!
//! The wire form is a JSON object with exactly one key:
//!
//! ```text
//! {"success":"<value>"}
//! {"failure":"<message>"}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ResponseError;

/// Outcome of executing an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    /// The operation's serialized result, e.g. a hex fingerprint or base64
    /// ciphertext.
    Success(String),

    /// Human-readable diagnostic.
    Failure(String),
}

impl Response {
    /// Successful response.
    pub fn success(value: impl Into<String>) -> Self {
        Self::Success(value.into())
    }

    /// Failed response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// True for [`Response::Success`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Success value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    /// Encode as a single-line JSON object.
    pub fn to_json(&self) -> Result<String, ResponseError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON. Anything but a single `success` or `failure` string
    /// key is rejected.
    pub fn from_json(json: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<E: fmt::Display> From<Result<String, E>> for Response {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error.to_string()),
        }
    }
}
