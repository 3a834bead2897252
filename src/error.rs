use std::time::Duration;

use thiserror::Error;

/// Errors returned while resolving an address or querying the API.
///
/// An offline server is not an error: it comes back as a normal response
/// with `online == false`.
#[derive(Error, Debug)]
pub enum Error {
    /// The address or port was rejected locally, before any request was sent.
    #[error("invalid server address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// DNS, connection, TLS, proxy or body read failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("mcstatus.io responded with HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The body was not JSON or lacked a field the record requires.
    #[error("failed to decode status response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Sorts a reqwest failure into `Timeout` or `Transport`.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout }
        } else {
            Self::Transport(err)
        }
    }

    /// True for [`Error::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// True for [`Error::InvalidAddress`], i.e. no request was sent.
    pub fn is_invalid_address(&self) -> bool {
        matches!(self, Self::InvalidAddress { .. })
    }
}

/// Result type alias for operations that can fail with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
