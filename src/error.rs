//! Error types for the iugu API client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! side tells apart the five ways a call can fail: a missing credential,
//! a locally rejected argument, a transport failure, a non-2xx response and
//! a success response whose body is not the expected JSON.

use thiserror::Error;

/// A specialized `Result` type for iugu operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all iugu API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The client could not be configured (e.g. no API token).
    #[error("Configuration error: {0}")]
    Config(String),

    /// An argument was rejected before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The underlying connection failed (DNS, refused, reset, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside `200..=299`.
    ///
    /// The body is kept exactly as received; it is never parsed as JSON
    /// because error pages are frequently HTML or plain text.
    #[error("HTTP error: status={status}, message={message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Reason phrase for the status code
        message: String,
        /// Raw response body
        raw_body: Vec<u8>,
        /// Response body decoded as UTF-8 (lossy)
        str_body: String,
    },

    /// A success response (or an outgoing body) was not valid JSON for the
    /// expected type.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this is an [`Error::Http`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the unparsed response body if this is an [`Error::Http`].
    ///
    /// # Example
    ///
    /// ```
    /// use iugu_rs::Error;
    ///
    /// let err = Error::from_status(404, Some("Not Found"), b"Not Found".to_vec());
    /// assert_eq!(err.body(), Some("Not Found"));
    /// ```
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Http { str_body, .. } => Some(str_body),
            _ => None,
        }
    }

    /// Returns `true` if the error was detected locally, before any request
    /// reached the network.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, missing credentials, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Http { status, .. } => (400..500).contains(status),
            Error::InvalidInput(_) | Error::Config(_) | Error::UrlParse(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Build an HTTP error from a status line and a raw body.
    pub fn from_status(status: u16, reason: Option<&str>, raw_body: Vec<u8>) -> Self {
        let str_body = String::from_utf8_lossy(&raw_body).into_owned();
        Error::Http {
            status,
            message: reason.unwrap_or_default().to_string(),
            raw_body,
            str_body,
        }
    }
}
