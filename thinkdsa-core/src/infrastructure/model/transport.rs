//! HTTP transport used by the model client.
//!
//! Kept behind a trait so the retry loop can be driven by scripted replies.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::types::ModelError;

/// Raw reply: status code and body, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `body` as JSON with the API key as the `key` query parameter.
    ///
    /// Non-success statuses are returned as replies, not errors; only failures
    /// to get any reply at all are errors.
    async fn post_json(&self, url: &str, api_key: &str, body: &Value)
    -> Result<HttpReply, ModelError>;
}

/// `reqwest`-backed transport
#[derive(Clone)]
pub struct ReqwestTransport {
    provider: String,
    http: Client,
}

impl ReqwestTransport {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            http: Client::new(),
        }
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<HttpReply, ModelError> {
        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.provider, without_url(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::network(&self.provider, without_url(e)))?;

        Ok(HttpReply { status, body })
    }
}

// The request URL carries the API key; keep it out of error messages.
fn without_url(err: reqwest::Error) -> reqwest::Error {
    err.without_url()
}
