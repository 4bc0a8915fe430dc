//! The immutable request value that flows through a handler chain.

use std::fmt;

/// An immutable request carrying a single string payload.
///
/// Handlers never change a `Request` in place. To change the payload,
/// build a new `Request`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Request {
    data: String,
}

impl Request {
    /// Create a request from any string, including the empty string.
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// The request payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Consume the request, returning its payload.
    pub fn into_data(self) -> String {
        self.data
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request{{data='{}'}}", self.data)
    }
}

impl From<&str> for Request {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

impl From<String> for Request {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}
