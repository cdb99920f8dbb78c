//! Authenticated requests.
//!
//! Every call carries the token header and JSON content negotiation. A
//! missing token fails before the transport is touched.

use std::sync::Arc;

use tracing::{debug, instrument};

use pushpad_core::constants::{ACCEPT, AUTHORIZATION_HEADER, CONTENT_TYPE};
use pushpad_core::error::Result;
use pushpad_core::traits::{HttpMethod, HttpRequest, HttpResponse, Transport};
use pushpad_core::{PushpadConfig, QueryParams};

/// Issues authenticated calls over a [`Transport`].
#[derive(Clone)]
pub struct Requester {
    config: Arc<PushpadConfig>,
    transport: Arc<dyn Transport>,
}

impl Requester {
    /// Creates a requester from shared config and transport.
    pub fn new(config: Arc<PushpadConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Shared configuration.
    pub fn config(&self) -> &PushpadConfig {
        &self.config
    }

    /// HEAD request.
    pub async fn head(&self, endpoint: &str, query: &QueryParams) -> Result<HttpResponse> {
        self.perform(HttpMethod::Head, endpoint, query, None).await
    }

    /// GET request.
    pub async fn get(&self, endpoint: &str, query: &QueryParams) -> Result<HttpResponse> {
        self.perform(HttpMethod::Get, endpoint, query, None).await
    }

    /// POST request with a JSON body.
    pub async fn post(
        &self,
        endpoint: &str,
        query: &QueryParams,
        body: String,
    ) -> Result<HttpResponse> {
        self.perform(HttpMethod::Post, endpoint, query, Some(body)).await
    }

    /// PATCH request with a JSON body.
    pub async fn patch(
        &self,
        endpoint: &str,
        query: &QueryParams,
        body: String,
    ) -> Result<HttpResponse> {
        self.perform(HttpMethod::Patch, endpoint, query, Some(body)).await
    }

    /// DELETE request.
    pub async fn delete(&self, endpoint: &str, query: &QueryParams) -> Result<HttpResponse> {
        self.perform(HttpMethod::Delete, endpoint, query, None).await
    }

    #[instrument(skip(self, query, body))]
    async fn perform(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let headers = self.headers()?;
        let request = HttpRequest {
            method,
            url: query.apply_to(endpoint),
            headers,
            body,
        };

        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "Request completed");
        Ok(response)
    }

    fn headers(&self) -> Result<Vec<(String, String)>> {
        let token = self.config.require_auth_token()?;
        Ok(vec![
            (
                AUTHORIZATION_HEADER.to_string(),
                format!("Token token=\"{token}\""),
            ),
            ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
            ("Accept".to_string(), ACCEPT.to_string()),
        ])
    }
}

impl std::fmt::Debug for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requester")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
