//! Blocking client for the scheduler's triggers API.
//!
//! # Design
//! `TriggerClient` owns the base URL, the credential and one `Transport`,
//! and carries no other state between calls. Every operation goes through
//! `execute`, which builds the request, attaches auth and content type, and
//! classifies the response: status 200 hands the unread body back to the
//! operation for decoding, any other status becomes `TriggerError::Api`.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TriggerError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{Trigger, TriggerEnvelope};

pub const DEFAULT_BASE_URL: &str = "https://api.advancedscheduler.io";

/// Typed client for the `triggers` collection.
#[derive(Clone)]
pub struct TriggerClient<T = UreqTransport> {
    base_url: String,
    auth_token: String,
    transport: T,
}

impl TriggerClient<UreqTransport> {
    /// Client for the public API using a default `UreqTransport`.
    pub fn new(auth_token: &str) -> Self {
        Self::with_transport(DEFAULT_BASE_URL, auth_token, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(
            &config.base_url,
            &config.auth_token,
            UreqTransport::with_timeout(config.timeout()),
        )
    }
}

impl<T: Transport> TriggerClient<T> {
    pub fn with_transport(base_url: &str, auth_token: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.to_string(),
            transport,
        }
    }

    /// Fetch every trigger, keyed by uuid. A `null` body is an empty
    /// collection.
    pub fn list_all(&self) -> Result<HashMap<String, Trigger>, TriggerError> {
        let response = self.execute("triggers", HttpMethod::Get, None)?;
        let triggers: Option<HashMap<String, Trigger>> = decode(response)?;
        Ok(triggers.unwrap_or_default())
    }

    pub fn get(&self, uuid: &str) -> Result<Trigger, TriggerError> {
        let response = self.execute(&format!("triggers/{uuid}"), HttpMethod::Get, None)?;
        let envelope: TriggerEnvelope = decode(response)?;
        Ok(envelope.trigger)
    }

    /// Create `trigger` and return the stored copy, carrying the
    /// server-assigned uuid and any defaulted timeout.
    pub fn create(&self, trigger: &Trigger) -> Result<Trigger, TriggerError> {
        let body = encode(trigger)?;
        let response = self.execute("triggers", HttpMethod::Post, Some(body))?;
        let envelope: TriggerEnvelope = decode(response)?;
        Ok(envelope.trigger)
    }

    /// Replace the stored trigger identified by `trigger.uuid` in full.
    ///
    /// Every field is sent; callers merge partial changes beforehand.
    pub fn update(&self, trigger: &Trigger) -> Result<(), TriggerError> {
        let body = encode(trigger)?;
        let response = self.execute(
            &format!("triggers/{}", trigger.uuid),
            HttpMethod::Put,
            Some(body),
        )?;
        release(response);
        Ok(())
    }

    pub fn delete(&self, uuid: &str) -> Result<(), TriggerError> {
        let response = self.execute(&format!("triggers/{uuid}"), HttpMethod::Delete, None)?;
        release(response);
        Ok(())
    }

    /// Describe the request `execute` sends for `path` without sending it.
    pub fn build_request(&self, path: &str, method: HttpMethod, body: Option<Vec<u8>>) -> HttpRequest {
        let mut headers = vec![("Authorization".to_string(), self.auth_token.clone())];
        match method {
            HttpMethod::Get | HttpMethod::Delete => {}
            HttpMethod::Post | HttpMethod::Put => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
            }
        }
        HttpRequest {
            method,
            url: format!("{}/{path}", self.base_url),
            headers,
            body,
        }
    }

    fn execute(&self, path: &str, method: HttpMethod, body: Option<Vec<u8>>) -> Result<HttpResponse, TriggerError> {
        let request = self.build_request(path, method, body);
        debug!(%method, url = %request.url, "sending request");

        let response = self.transport.send(request)?;
        debug!(%method, path, status = response.status, "received response");
        check_status(response)
    }
}

impl<T> fmt::Debug for TriggerClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Pass 200 responses through; turn anything else into `TriggerError::Api`.
fn check_status(mut response: HttpResponse) -> Result<HttpResponse, TriggerError> {
    if response.status == 200 {
        return Ok(response);
    }
    let mut raw = Vec::new();
    let body = match response.body.read_to_end(&mut raw) {
        Ok(_) => String::from_utf8_lossy(&raw).into_owned(),
        Err(_) => String::new(),
    };
    Err(TriggerError::Api {
        status: response.status,
        body,
    })
}

fn encode(trigger: &Trigger) -> Result<Vec<u8>, TriggerError> {
    serde_json::to_vec(trigger).map_err(TriggerError::Encode)
}

fn decode<D: DeserializeOwned>(response: HttpResponse) -> Result<D, TriggerError> {
    serde_json::from_reader(response.body).map_err(TriggerError::Decode)
}

/// Drop a response whose body is ignored, draining it first so the
/// connection can be reused.
fn release(mut response: HttpResponse) {
    if let Err(err) = io::copy(&mut response.body, &mut io::sink()) {
        debug!(status = response.status, error = %err, "failed to drain ignored response body");
    }
}
