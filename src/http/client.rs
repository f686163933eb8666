//! HTTP transport — sends a [`PreparedRequest`] and decodes the response.
//!
//! One fixed connect/total timeout per call, no retries: a timeout or
//! transport failure surfaces as a `NetworkError` for the caller to handle.

use serde_json::Value;

use crate::error::{NetworkError, SdkError};
use crate::http::builder::PreparedRequest;
use crate::network::HTTP_TIMEOUT;

/// Thin wrapper over the HTTP client pair (suspending + blocking).
#[derive(Debug)]
pub struct Transport {
    client: reqwest::Client,
}

impl Transport {
    pub fn new() -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .connect_timeout(HTTP_TIMEOUT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(NetworkError::Transport)?;
        Ok(Self { client })
    }

    /// Perform the exchange asynchronously.
    pub async fn send(&self, request: &PreparedRequest) -> Result<Value, SdkError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut req = self
            .client
            .request(parse_method(&request.method)?, &request.url);
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if !request.body.is_empty() {
            req = req.body(request.body.clone());
        }

        let resp = req.send().await.map_err(NetworkError::Transport)?;
        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(NetworkError::Transport)?;
        decode_response(status, text)
    }

    /// Perform the exchange on the calling thread.
    ///
    /// Builds a dedicated blocking client per call; must not be used from
    /// within an async runtime.
    pub fn send_blocking(&self, request: &PreparedRequest) -> Result<Value, SdkError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request (blocking)");

        let client = reqwest::blocking::Client::builder()
            .connect_timeout(HTTP_TIMEOUT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(NetworkError::Transport)?;

        let mut req = client.request(parse_method(&request.method)?, &request.url);
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if !request.body.is_empty() {
            req = req.body(request.body.clone());
        }

        let resp = req.send().map_err(NetworkError::Transport)?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(NetworkError::Transport)?;
        decode_response(status, text)
    }
}

fn parse_method(method: &str) -> Result<reqwest::Method, SdkError> {
    match method {
        "GET" => Ok(reqwest::Method::GET),
        "POST" => Ok(reqwest::Method::POST),
        other => Err(SdkError::Other(format!("unsupported method: {other}"))),
    }
}

/// 2xx with an empty body decodes to `null`; any non-2xx is a status error.
fn decode_response(status: u16, body: String) -> Result<Value, SdkError> {
    if (200..300).contains(&status) {
        if body.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&body)?)
        }
    } else {
        tracing::warn!(status, "request failed");
        Err(NetworkError::Status { status, body }.into())
    }
}
