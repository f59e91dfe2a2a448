//! Action protocol for the cross-platform interop harness.
//!
//! Every platform binding of the crypto client is driven through the same
//! command vocabulary. A request is URL-shaped: the host names the command
//! and the query string carries its parameters.
//!
//! ```text
//! interop://encrypt-message?cid=Y2lk&message=bXNn
//!           └──── selector ─┘ └──── parameters ────┘
//! ```
//!
//! A [`Request`] is decoded into exactly one typed [`Action`], or into
//! nothing at all. The outcome of executing the action travels back as a
//! [`Response`].
//!
//! # Failure collapsing
//!
//! [`Action::parse`] returns `None` for an unknown selector, a missing
//! parameter, and a malformed parameter alike. Other platform bindings report
//! the same single failure signal, so finer-grained parse errors would make
//! the bindings observably diverge. Diagnostics go to `tracing` instead.

#![forbid(unsafe_code)]

pub mod action;
pub mod command;
pub mod errors;
pub mod request;
pub mod response;

pub use action::Action;
pub use command::Command;
pub use errors::{RequestError, ResponseError};
pub use request::{QueryItem, Request};
pub use response::Response;
