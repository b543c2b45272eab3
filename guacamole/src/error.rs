//! Error types for the Guacamole client and collection cycle.
//!
//! Request URLs carry the auth token, so every `reqwest::Error` is stored with
//! its URL stripped.

use reqwest::StatusCode;
use thiserror::Error;

use crate::extract::Shape;

/// The HTTP client could not be built.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying `reqwest` client failed to build.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Token acquisition failed. Fatal to the collection cycle.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token request could not be sent or its body could not be read.
    #[error("Token request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server rejected the token request.
    #[error("Token request returned HTTP {0}")]
    Status(StatusCode),

    /// The response body is not a JSON token grant.
    #[error("Token response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried no token.
    #[error("Token response contained an empty authToken")]
    EmptyToken,
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

/// An authenticated read failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Request returned HTTP {0}")]
    Status(StatusCode),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

/// A payload could not be reduced to a count.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not valid JSON.
    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is JSON but its top-level value has the wrong shape.
    #[error("Expected a JSON {expected}, found {found}")]
    Shape {
        /// The shape the resource should have.
        expected: Shape,
        /// The JSON type actually found.
        found: &'static str,
    },
}

/// Querying a single resource failed. Non-fatal: only that metric is omitted.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Fetching the payload failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Extracting the count failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
