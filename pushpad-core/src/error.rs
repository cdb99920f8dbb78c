//! Error types for Pushpad.
//!
//! Every operation family has its own variant so callers can match on what
//! failed. API failures carry the raw status, reason phrase and body.

use std::fmt;

use thiserror::Error;

/// Result type alias using `PushpadError`.
pub type Result<T> = std::result::Result<T, PushpadError>;

/// Details of a response whose status did not match the expected one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status code returned by the service
    pub status: u16,
    /// Canonical reason phrase of the status (empty for unregistered codes)
    pub message: String,
    /// Raw response body
    pub body: String,
}

impl ApiFailure {
    /// Creates a failure record.
    pub fn new(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response {} {}: {}", self.status, self.message, self.body)
    }
}

/// The operation families checked against a single expected status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// POST of a new resource.
    Create,
    /// GET of one resource or a collection.
    Find,
    /// PATCH of an existing resource.
    Update,
    /// DELETE of an existing resource.
    Delete,
    /// Notification broadcast / targeted delivery.
    Deliver,
    /// Cancellation of a scheduled notification.
    Cancel,
    /// HEAD count of subscriptions.
    Count,
}

impl Operation {
    /// Wraps a failure into this operation's error variant.
    pub fn failure(self, failure: ApiFailure) -> PushpadError {
        match self {
            Operation::Create => PushpadError::CreateError(failure),
            Operation::Find => PushpadError::FindError(failure),
            Operation::Update => PushpadError::UpdateError(failure),
            Operation::Delete => PushpadError::DeleteError(failure),
            Operation::Deliver => PushpadError::DeliveryError(failure),
            Operation::Cancel => PushpadError::CancelError(failure),
            Operation::Count => PushpadError::CountError(failure),
        }
    }
}

/// Main error type for all Pushpad operations.
#[derive(Debug, Error)]
pub enum PushpadError {
    // ═══════════════════════════════════════════════════════════════════════════
    // LOCAL ERRORS (no request was made)
    // ═══════════════════════════════════════════════════════════════════════════

    /// Missing auth token, project id or resource id.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Delivery attempted on a notification obtained through a lookup.
    #[error("Notifications fetched with `find` cannot be delivered again")]
    ReadOnly,

    // ═══════════════════════════════════════════════════════════════════════════
    // API ERRORS (unexpected status code)
    // ═══════════════════════════════════════════════════════════════════════════

    /// Resource creation failed.
    #[error("Create failed: {0}")]
    CreateError(ApiFailure),

    /// Lookup of one resource or a collection failed.
    #[error("Find failed: {0}")]
    FindError(ApiFailure),

    /// Update failed.
    #[error("Update failed: {0}")]
    UpdateError(ApiFailure),

    /// Deletion failed.
    #[error("Delete failed: {0}")]
    DeleteError(ApiFailure),

    /// Notification delivery failed.
    #[error("Delivery failed: {0}")]
    DeliveryError(ApiFailure),

    /// Notification cancellation failed.
    #[error("Cancel failed: {0}")]
    CancelError(ApiFailure),

    /// Subscription count failed.
    #[error("Count failed: {0}")]
    CountError(ApiFailure),

    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSPORT & DECODING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Response arrived but could not be interpreted.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PushpadError {
    /// Returns the API failure details, if this is an API error.
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            PushpadError::CreateError(f)
            | PushpadError::FindError(f)
            | PushpadError::UpdateError(f)
            | PushpadError::DeleteError(f)
            | PushpadError::DeliveryError(f)
            | PushpadError::CancelError(f)
            | PushpadError::CountError(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        self.api_failure().map(|f| f.status)
    }

    /// Returns true if the error was detected locally from missing configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, PushpadError::ConfigError(_))
    }

    /// Returns true if the service answered with an unexpected status.
    pub fn is_api_error(&self) -> bool {
        self.api_failure().is_some()
    }

    /// Configuration error for a required value that was not set.
    pub fn missing(what: &str) -> Self {
        PushpadError::ConfigError(format!("You must set {what}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_failure_display() {
        let err = Operation::Deliver.failure(ApiFailure::new(403, "Forbidden", "{}"));
        assert_eq!(err.to_string(), "Delivery failed: Response 403 Forbidden: {}");
    }

    #[test]
    fn test_operation_maps_to_variant() {
        let f = || ApiFailure::new(500, "", "");
        assert!(matches!(Operation::Create.failure(f()), PushpadError::CreateError(_)));
        assert!(matches!(Operation::Find.failure(f()), PushpadError::FindError(_)));
        assert!(matches!(Operation::Update.failure(f()), PushpadError::UpdateError(_)));
        assert!(matches!(Operation::Delete.failure(f()), PushpadError::DeleteError(_)));
        assert!(matches!(Operation::Deliver.failure(f()), PushpadError::DeliveryError(_)));
        assert!(matches!(Operation::Cancel.failure(f()), PushpadError::CancelError(_)));
        assert!(matches!(Operation::Count.failure(f()), PushpadError::CountError(_)));
    }

    #[test]
    fn test_error_classification() {
        let api = Operation::Count.failure(ApiFailure::new(503, "Service Unavailable", ""));
        assert!(api.is_api_error());
        assert_eq!(api.status(), Some(503));
        assert!(!api.is_config_error());

        let config = PushpadError::missing("project_id");
        assert!(config.is_config_error());
        assert!(config.to_string().contains("must set project_id"));
        assert_eq!(config.status(), None);

        assert!(!PushpadError::ReadOnly.is_api_error());
        assert!(!PushpadError::HttpError("timeout".into()).is_config_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(PushpadError::from);
        assert!(matches!(result, Err(PushpadError::JsonError(_))));
    }
}
