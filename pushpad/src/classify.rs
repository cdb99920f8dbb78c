//! Maps raw responses onto typed outcomes.
//!
//! Each operation family has exactly one success status. Anything else is
//! reported as that family's error, carrying status, reason phrase and body.

use serde::de::DeserializeOwned;
use tracing::debug;

use pushpad_core::error::{ApiFailure, Operation, Result};
use pushpad_core::traits::HttpResponse;

/// Passes the response through if its status is `expected`.
pub fn expect_status(
    operation: Operation,
    expected: u16,
    response: HttpResponse,
) -> Result<HttpResponse> {
    if response.status == expected {
        return Ok(response);
    }

    debug!(?operation, expected, status = response.status, "Unexpected status");
    Err(operation.failure(ApiFailure::new(
        response.status,
        response.reason,
        response.body,
    )))
}

/// Decodes a successful JSON body.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    Ok(serde_json::from_str(&response.body)?)
}
