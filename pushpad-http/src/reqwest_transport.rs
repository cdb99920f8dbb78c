//! reqwest-backed transport.
//!
//! Returns every response as-is, whatever its status; only failures to get
//! a response at all become errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};

use pushpad_core::error::{PushpadError, Result};
use pushpad_core::traits::{HttpMethod, HttpRequest, HttpResponse, Transport};
use pushpad_core::PushpadConfig;

/// Transport performing real HTTPS calls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport honouring the configured timeout.
    pub fn with_config(config: &PushpadConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PushpadError::HttpError(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Wraps an existing reqwest client.
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http_client
            .request(method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PushpadError::HttpError(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| PushpadError::HttpError(e.to_string()))?;

        debug!(status = status.as_u16(), "Received response");
        Ok(HttpResponse {
            status: status.as_u16(),
            // reqwest does not expose the server's own phrase
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
