//! Structured requests.
//!
//! A [`Request`] is a URL split into its command selector (the host) and its
//! query items. Query values are percent-decoded but `+` is kept literally,
//! because base64 payloads use it and other bindings decode query items the
//! same way.

use std::{borrow::Cow, fmt, str::FromStr};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::debug;
use url::Url;

use crate::errors::RequestError;

/// URL scheme used when rendering requests.
pub const SCHEME: &str = "interop";

/// Everything outside the RFC 3986 unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// A single named query parameter.
///
/// A component without `=` has a name but no value, and counts as absent for
/// lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    /// Parameter name
    pub name: String,
    /// Parameter value, if the component had an `=`
    pub value: Option<String>,
}

impl QueryItem {
    /// Item with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }
}

/// A command selector plus its ordered query items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    selector: String,
    items: Vec<QueryItem>,
}

impl Request {
    /// Request with no parameters.
    pub fn new(selector: impl Into<String>) -> Self {
        Self { selector: selector.into(), items: Vec::new() }
    }

    /// Append a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.push(QueryItem::new(name, value));
        self
    }

    /// Append a raw query item.
    #[must_use]
    pub fn with_item(mut self, item: QueryItem) -> Self {
        self.items.push(item);
        self
    }

    /// Decompose a URL such as `interop://get-prekey?id=7`.
    ///
    /// The scheme is not checked. Empty query components are skipped. A query
    /// value that is not UTF-8 after percent-decoding is kept as a valueless
    /// item, so it only matters if a command requires that parameter.
    ///
    /// URL parsing would silently drop tabs and line breaks inside the input,
    /// which would alter verbatim text parameters, so those are rejected.
    /// Surrounding whitespace is trimmed.
    pub fn from_url(input: &str) -> Result<Self, RequestError> {
        let trimmed = input.trim_matches(|c: char| c.is_ascii_control() || c == ' ');
        if trimmed.contains(['\t', '\n', '\r']) {
            return Err(RequestError::EmbeddedWhitespace { url: input.to_owned() });
        }

        let url = Url::parse(trimmed)?;

        let selector = match url.host_str() {
            Some(host) if !host.is_empty() => decode(host)?,
            _ => return Err(RequestError::MissingSelector { url: input.to_owned() }),
        };

        let items = match url.query() {
            Some(query) => parse_query(query),
            None => Vec::new(),
        };

        Ok(Self { selector, items })
    }

    /// The command selector.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// All query items in order.
    pub fn items(&self) -> &[QueryItem] {
        &self.items
    }

    /// Value of the first item named `name`.
    ///
    /// Later items with the same name are never consulted, even if the first
    /// one carries no value.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.items.iter().find(|item| item.name == name)?.value.as_deref()
    }

    /// Render as `interop://<selector>?<name>=<value>&...`.
    pub fn to_url(&self) -> String {
        let mut url = format!("{SCHEME}://{}", utf8_percent_encode(&self.selector, COMPONENT));

        for (index, item) in self.items.iter().enumerate() {
            url.push(if index == 0 { '?' } else { '&' });
            url.extend(utf8_percent_encode(&item.name, COMPONENT));
            if let Some(value) = &item.value {
                url.push('=');
                url.extend(utf8_percent_encode(value, COMPONENT));
            }
        }

        url
    }
}

impl FromStr for Request {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(s)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

fn parse_query(query: &str) -> Vec<QueryItem> {
    query
        .split('&')
        .filter(|component| !component.is_empty())
        .map(|component| {
            let (name, value) = match component.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (component, None),
            };
            // An undecodable name keeps its raw text, which contains `%` and so
            // never matches a parameter name.
            let name = decode(name).unwrap_or_else(|_| name.to_owned());
            let value = value.and_then(|value| {
                decode(value)
                    .inspect_err(|error| debug!(param = %name, %error, "dropping query value"))
                    .ok()
            });
            QueryItem { name, value }
        })
        .collect()
}

fn decode(component: &str) -> Result<String, RequestError> {
    percent_decode_str(component)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| RequestError::InvalidEncoding { component: component.to_owned() })
}
