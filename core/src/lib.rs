//! Synchronous API client core for the Advanced Scheduler triggers service.
//!
//! # Overview
//! `TriggerClient` performs authenticated CRUD calls against the `/triggers`
//! collection. Each call is one blocking round-trip through a pluggable
//! `Transport`; the default is `UreqTransport`.
//!
//! # Design
//! - `TriggerClient` holds the base URL, the raw credential and its
//!   transport, and nothing else. There is no cache between calls.
//! - Only HTTP 200 counts as success. Every other status, including other
//!   2xx codes, surfaces as `TriggerError::Api` with the status and body.
//! - No retries and no default timeout; configure one through
//!   `ClientConfig::timeout_secs` or `UreqTransport::with_timeout`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use crate::client::{TriggerClient, DEFAULT_BASE_URL};
pub use crate::config::ClientConfig;
pub use crate::error::{TransportError, TriggerError};
pub use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use crate::types::{Trigger, TriggerEnvelope};
