//! Error types for the Acrolinx client.
//!
//! Failures fall into four groups:
//! - construction errors (an unparseable platform URL)
//! - transport errors (connection, timeout, undecodable body)
//! - service errors (the platform answered with a non-empty `error` object)
//! - sign-in errors (credentials rejected or no token in the response)
//!
//! Nothing is retried internally; every error reaches the immediate caller.

use crate::types::RequestError;

/// Unified error type for all client operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AcrolinxError {
    /// The platform URL could not be parsed. Raised by client construction,
    /// before any request is made.
    #[error("Error parsing platform URL `{url}`: {message}")]
    InvalidUrl {
        /// The URL as given by the caller.
        url: String,
        /// Parser message.
        message: String,
    },

    /// A header value could not be encoded (e.g. a signature containing a newline).
    #[error("Invalid value for header {name}: {message}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Encoding failure.
        message: String,
    },

    /// The request body could not be encoded as JSON.
    #[error("Error encoding JSON: {0}")]
    Serialization(String),

    /// Transport-level failure (connection refused, body read failed, etc.).
    #[error("Error submitting request: {0}")]
    Transport(String),

    /// The request exceeded the client timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body was not the JSON we expected.
    #[error("Error decoding JSON response: {0}")]
    InvalidJson(String),

    /// The platform reported an error in the response envelope.
    ///
    /// The message is the service's `detail` text, verbatim.
    #[error("{}", .0.detail)]
    Service(RequestError),

    /// Signing in failed. The client's auth state is left untouched.
    #[error("Error signing in: {0}")]
    SignIn(Box<AcrolinxError>),

    /// A sign-in response decoded cleanly but carried no access token.
    #[error("response contained no access token")]
    MissingToken,
}

/// Convenience result type for client operations.
pub type AcrolinxResult<T> = Result<T, AcrolinxError>;

impl AcrolinxError {
    /// Whether the platform itself rejected the request.
    pub fn is_service(&self) -> bool {
        self.service_error().is_some()
    }

    /// The decoded service error, if this is (or wraps) one.
    pub fn service_error(&self) -> Option<&RequestError> {
        match self {
            AcrolinxError::Service(err) => Some(err),
            AcrolinxError::SignIn(inner) => inner.service_error(),
            _ => None,
        }
    }

    /// The HTTP-like status the service attached to its error, when present.
    pub fn status(&self) -> Option<u16> {
        self.service_error()
            .and_then(|err| u16::try_from(err.status).ok())
            .filter(|status| *status != 0)
    }

    pub(crate) fn sign_in(err: AcrolinxError) -> Self {
        match err {
            already @ AcrolinxError::SignIn(_) => already,
            other => AcrolinxError::SignIn(Box::new(other)),
        }
    }
}

impl From<serde_json::Error> for AcrolinxError {
    fn from(err: serde_json::Error) -> Self {
        AcrolinxError::InvalidJson(err.to_string())
    }
}

impl From<RequestError> for AcrolinxError {
    fn from(err: RequestError) -> Self {
        AcrolinxError::Service(err)
    }
}
