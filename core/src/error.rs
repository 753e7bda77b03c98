//! Error types for the triggers API client.
//!
//! # Design
//! Every non-200 response lands in `Api` with the raw status code and body,
//! whatever the status. Callers that care about specific statuses inspect
//! `status()` or `is_not_found()` instead of matching dedicated variants.

use thiserror::Error;

/// The request could not be sent or no response was received.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(err.into())
    }
}

/// Errors returned by `TriggerClient` operations.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Network, DNS or connection failure; no response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The outgoing trigger could not be serialized to JSON.
    #[error("failed to encode trigger: {0}")]
    Encode(#[source] serde_json::Error),

    /// A 200 response body was not valid JSON of the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server answered with anything other than 200. `body` is empty when
    /// it could not be read.
    #[error("got a non 200 status code: {status}{}", body_suffix(.body))]
    Api { status: u16, body: String },
}

impl TriggerError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            TriggerError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}
