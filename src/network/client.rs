use crate::core::{HttpVerb, RegistryRequest};
use crate::error::{ClientError, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use std::time::Duration;

const DEFAULT_SCHEME: &str = "http://";

/// Status and raw body of a registry reply. Any status, including 4xx and
/// 5xx, is a completed round trip.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Blocking HTTP client for one registry endpoint
pub struct RegistryClient {
    base_url: String,
    http: Client,
}

impl RegistryClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<RegistryClient> {
        let base_url = normalize_endpoint(endpoint)?;
        // One timeout for the whole round trip
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(RegistryClient { base_url, http })
    }

    pub fn url_for<R: RegistryRequest>(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    /// Send the canonical encoding of `request` as the body. One attempt,
    /// no retries.
    pub fn send<R: RegistryRequest>(&self, request: &R) -> Result<RawResponse> {
        let url = self.url_for::<R>();
        // Deterministic encoder, so these are the bytes the nonce was found for
        let body = request.encode()?;
        // get_site is a GET with a JSON body, like the registry expects
        let method = match R::VERB {
            HttpVerb::Get => Method::GET,
            HttpVerb::Post => Method::POST,
        };
        info!("Sending {method} {url}");
        debug!("Request body {}", String::from_utf8_lossy(&body));

        let response = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| ClientError::Network(format!("Request to {url} failed: {e}")))?;

        // Status is not checked here, the caller prints whatever came back
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ClientError::Network(format!("Failed to read response body: {e}")))?;
        info!("Registry answered {status}");
        Ok(RawResponse { status, body })
    }
}

/// Prefix `http://` when the endpoint has no scheme and drop trailing slashes
pub fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientError::Config("endpoint is empty".to_string()));
    }
    // Keep an explicit scheme such as https://
    if trimmed.contains("://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{DEFAULT_SCHEME}{trimmed}"))
    }
}
