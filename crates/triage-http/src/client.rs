//! HTTP client for the sandbox API.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::Form;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use triage_core::error::{Error, ProtocolError, TransportError};
use triage_core::types::ApiUrl;

use crate::endpoints::ErrorResponse;
use crate::key::ApiKey;

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Authenticated HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: ApiUrl,
    key: ApiKey,
}

impl HttpClient {
    /// Create a client with the default timeout.
    pub fn new(base: ApiUrl, key: ApiKey) -> Result<Self, Error> {
        Self::with_timeout(base, key, DEFAULT_TIMEOUT)
    }

    /// Create a client with a per-request timeout.
    pub fn with_timeout(base: ApiUrl, key: ApiKey, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("triage-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, base, key })
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// GET an endpoint, returning the raw body.
    #[instrument(skip(self), fields(api = %self.base))]
    pub async fn get(&self, path: &str) -> Result<Vec<u8>, Error> {
        let url = self.base.endpoint(path);
        debug!(path, "GET");

        let request = self.client.get(&url);
        self.send(request).await
    }

    /// GET an endpoint with query parameters, returning the raw body.
    #[instrument(skip(self), fields(api = %self.base))]
    pub async fn get_with<Q>(&self, path: &str, params: &Q) -> Result<Vec<u8>, Error>
    where
        Q: Serialize + std::fmt::Debug,
    {
        let url = self.base.endpoint(path);
        debug!(path, "GET");
        trace!(?params, "query parameters");

        let request = self.client.get(&url).query(params);
        self.send(request).await
    }

    /// POST a multipart form, returning the raw body.
    #[instrument(skip(self, form), fields(api = %self.base))]
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Vec<u8>, Error> {
        let url = self.base.endpoint(path);
        debug!(path, "POST multipart");

        let request = self.client.post(&url).multipart(form);
        self.send(request).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, Error> {
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", self.key.expose()))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "response");

        let body = response.bytes().await.map_err(transport_error)?;
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(Error::Protocol(parse_error_response(status.as_u16(), &body)))
        }
    }
}

/// Map a reqwest failure onto the transport error taxonomy.
pub fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

fn parse_error_response(status: u16, body: &[u8]) -> ProtocolError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(error_body) => ProtocolError::new(status, error_body.error, error_body.message),
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            ProtocolError::new(status, None, (!text.is_empty()).then_some(text))
        }
    }
}
