//! In-memory transport.
//!
//! Records every request and answers from a queue of canned responses.
//! Suitable for tests and for exercising the client without a network.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use pushpad_core::error::{PushpadError, Result};
use pushpad_core::traits::{HttpRequest, HttpResponse, Transport};

/// Recording transport with queued responses.
///
/// # Thread Safety
///
/// Safe to share between tasks; responses are handed out in FIFO order.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Creates a transport with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response.
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().push_back(response);
    }

    /// Queues a response with a JSON body.
    pub fn push_json(&self, status: u16, body: impl ToString) {
        self.push_response(HttpResponse::new(status, body.to_string()));
    }

    /// Queues an empty-bodied response.
    pub fn push_status(&self, status: u16) {
        self.push_response(HttpResponse::new(status, ""));
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| PushpadError::HttpError("no response queued".into()))
    }
}
