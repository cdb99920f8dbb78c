//! # Pushpad Core
//!
//! Core types, errors, and traits shared by the Pushpad client crates.
//!
//! This crate provides the foundational building blocks used by all other Pushpad crates:
//!
//! - **Types**: Notifications, subscriptions, projects, senders, audience filters
//! - **Errors**: The typed failure taxonomy returned by every operation
//! - **Config**: Credentials and service location, shared read-only
//! - **Traits**: The [`Transport`] seam between the protocol and real HTTP
//!
//! ## Example
//!
//! ```rust
//! use pushpad_core::{AudienceFilter, Tags};
//!
//! let filter = AudienceFilter::new()
//!     .with_uids(["a", "b"])
//!     .with_tags(Tags::expression("sports || travel"));
//! assert_eq!(
//!     filter.query_params().to_query_string(),
//!     "uids[]=a&uids[]=b&tags=sports%20%7C%7C%20travel"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod query;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::PushpadConfig;
pub use constants::*;
pub use error::{ApiFailure, Operation, PushpadError, Result};
pub use query::QueryParams;
pub use traits::*;
pub use types::*;
