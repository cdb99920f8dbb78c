//! Common traits for Pushpad.
//!
//! The [`Transport`] trait is the seam between the request protocol and the
//! network, so the protocol can be exercised against an in-memory transport.

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// WIRE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HEAD (subscription count)
    Head,
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Head => "HEAD",
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request: absolute URL with query, headers, optional body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute URL including the encoded query string
    pub url: String,
    /// Header pairs in insertion order
    pub headers: Vec<(String, String)>,
    /// JSON body for POST/PATCH
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A raw response; success is decided by the caller, not the transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Canonical reason phrase for `status` (e.g. "Not Found"), not the
    /// phrase sent on the wire; empty for unregistered codes
    pub reason: String,
    /// Header pairs
    pub headers: Vec<(String, String)>,
    /// Body as text (empty for HEAD)
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Default::default()
        }
    }

    /// Adds a reason phrase.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSPORT TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for issuing one HTTP round-trip.
///
/// Implementations might use:
/// - reqwest (production)
/// - an in-memory recorder (tests)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the complete response.
    ///
    /// Only failures to obtain a response are errors; any status code is `Ok`.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, "").with_header("x-total-count", "100");
        assert_eq!(response.header("X-Total-Count"), Some("100"));
        assert_eq!(response.header("X-Other"), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Head.as_str(), "HEAD");
    }
}
