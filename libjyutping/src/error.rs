//! Error taxonomy for the cloud suggestion path.
//!
//! Everything that can go wrong between building a request locator and
//! handing decoded candidates to the session. All of these surface to the
//! user as a visible error message; none are retried automatically — the
//! user re-triggers by editing input.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CloudError {
    /// Empty query handed to the locator builder. The state machine checks
    /// the query segment before dispatching, so reaching this is a caller
    /// bug, not a user-visible condition.
    #[error("query text is empty")]
    InvalidInput,

    /// The response body is not a callback-invocation envelope.
    #[error("response is not a callback envelope")]
    MalformedEnvelope,

    /// The text inside the callback parentheses is not valid JSON.
    #[error("callback payload is not valid JSON: {0}")]
    MalformedPayload(String),

    /// The payload parsed but is not the expected status/data array.
    #[error("response payload has an unexpected shape")]
    UnexpectedShape,

    /// The provider reported a non-success status.
    #[error("provider returned status {0:?}")]
    Provider(String),

    /// Network failure or non-2xx HTTP status.
    #[error("transport failure: {0}")]
    Transport(String),
}
