//! Authenticated request transport for the Pushpad API.
//!
//! [`Requester`] adds credentials and query strings to every call;
//! [`ReqwestTransport`] performs the I/O and [`MockTransport`] replays
//! canned responses for tests.

mod mock;
mod request;
mod reqwest_transport;

pub use mock::MockTransport;
pub use request::Requester;
pub use reqwest_transport::ReqwestTransport;
