//! Outbound HTTP transport shared by the service clients

use crate::error::{BoomError, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A JSON POST to a third-party service
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub bearer_token: Option<String>,
    /// Extra headers, e.g. an API key that must stay out of the URL
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

/// Raw status and body; classification is left to the caller
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: u16,
    pub body: String,
}

impl OutboundResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Turn a non-success status into an upstream error
    pub fn error_for_status(self, service: &'static str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(BoomError::Upstream {
            service,
            status: self.status,
            body: self.body,
        })
    }
}

/// Seam between the clients and the network
///
/// Network-level failures are errors; HTTP error statuses are not.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, request: OutboundRequest) -> Result<OutboundResponse>;
}

pub struct ReqwestTransport {
    http_client: HttpClient,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: OutboundRequest) -> Result<OutboundResponse> {
        let mut builder = self.http_client.post(&request.url).json(&request.body);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        // Error text would otherwise carry the full URL
        let response = builder.send().await.map_err(|e| e.without_url())?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(OutboundResponse { status, body })
    }
}
