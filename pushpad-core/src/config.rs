//! Client configuration: credentials and service location.
//!
//! A `PushpadConfig` is built once by the host application and shared
//! read-only (behind an `Arc`) by every component that issues requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::error::{PushpadError, Result};

/// Environment variable holding the auth token.
pub const ENV_AUTH_TOKEN: &str = "PUSHPAD_AUTH_TOKEN";
/// Environment variable holding the default project id.
pub const ENV_PROJECT_ID: &str = "PUSHPAD_PROJECT_ID";
/// Environment variable overriding the service host.
pub const ENV_BASE_URL: &str = "PUSHPAD_BASE_URL";
/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECONDS: &str = "PUSHPAD_TIMEOUT_SECONDS";

/// Credentials and service settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct PushpadConfig {
    /// API token, also the HMAC key for uid signatures
    pub auth_token: Option<String>,
    /// Project used when an operation does not name one
    pub project_id: Option<u64>,
    /// Service host, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for PushpadConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            project_id: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl fmt::Debug for PushpadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushpadConfig")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl PushpadConfig {
    /// Creates a configuration with the given auth token.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(auth_token.into()),
            ..Default::default()
        }
    }

    /// Sets the default project.
    pub fn with_project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Points the client at another host (e.g. a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Loads configuration from the environment (and `.env`, if present).
    ///
    /// Empty variables count as unset.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self {
            auth_token: var(ENV_AUTH_TOKEN),
            ..Default::default()
        };

        if let Some(raw) = var(ENV_PROJECT_ID) {
            let id = raw.parse::<u64>().map_err(|_| {
                PushpadError::ConfigError(format!("{ENV_PROJECT_ID} is not a valid id: {raw}"))
            })?;
            config.project_id = Some(id);
        }

        if let Some(url) = var(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }

        if let Some(raw) = var(ENV_TIMEOUT_SECONDS) {
            config.timeout_seconds = raw.parse::<u64>().map_err(|_| {
                PushpadError::ConfigError(format!("{ENV_TIMEOUT_SECONDS} is not a number: {raw}"))
            })?;
        }

        Ok(config)
    }

    /// Returns the auth token, failing if none is configured.
    pub fn require_auth_token(&self) -> Result<&str> {
        self.auth_token
            .as_deref()
            .ok_or_else(|| PushpadError::missing("auth_token"))
    }

    /// Resolves the project for an operation: the override, else the default.
    pub fn resolve_project_id(&self, project_id: Option<u64>) -> Result<u64> {
        project_id
            .or(self.project_id)
            .ok_or_else(|| PushpadError::missing("project_id"))
    }

    /// Builds an absolute URL for a path on the service host.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = PushpadConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(config.auth_token.is_none());
        assert!(config.project_id.is_none());
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = PushpadConfig::default().require_auth_token().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("must set auth_token"));
    }

    #[test]
    fn test_resolve_project_id() {
        let config = PushpadConfig::new("abc123").with_project_id(123);
        assert_eq!(config.resolve_project_id(None).unwrap(), 123);
        assert_eq!(config.resolve_project_id(Some(5)).unwrap(), 5);

        let err = PushpadConfig::new("abc123").resolve_project_id(None).unwrap_err();
        assert!(err.to_string().contains("must set project_id"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = PushpadConfig::new("t").with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.url("/api/v1/projects"), "http://127.0.0.1:8080/api/v1/projects");
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_empty_variables_are_unset() {
        let config = PushpadConfig::from_lookup(lookup(&[
            (ENV_AUTH_TOKEN, ""),
            (ENV_PROJECT_ID, ""),
            (ENV_BASE_URL, " "),
            (ENV_TIMEOUT_SECONDS, ""),
        ]))
        .unwrap();

        assert!(config.auth_token.is_none());
        assert!(config.project_id.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        // a CLI override still applies on top
        assert_eq!(config.with_project_id(9).resolve_project_id(None).unwrap(), 9);
    }

    #[test]
    fn test_lookup_values_parsed() {
        let config = PushpadConfig::from_lookup(lookup(&[
            (ENV_AUTH_TOKEN, "abc123"),
            (ENV_PROJECT_ID, " 123 "),
            (ENV_BASE_URL, "http://127.0.0.1:9000/"),
            (ENV_TIMEOUT_SECONDS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.auth_token.as_deref(), Some("abc123"));
        assert_eq!(config.project_id, Some(123));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_invalid_project_id_is_config_error() {
        let err = PushpadConfig::from_lookup(lookup(&[(ENV_PROJECT_ID, "abc")])).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains(ENV_PROJECT_ID));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = PushpadConfig::new("super-secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("REDACTED"));
    }
}
