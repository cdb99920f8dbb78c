//! # Pushpad
//!
//! Client for the Pushpad web push notification service.
//!
//! ## Features
//!
//! - **Notifications**: broadcast, targeted delivery by uid and tags, lookup, cancellation
//! - **Subscriptions**: count and list with audience filters, create, update, delete
//! - **Projects & Senders**: full CRUD
//! - **Signatures**: HMAC-SHA1 uid signatures and signed subscription-management links
//!
//! ## Example
//!
//! ```rust,ignore
//! use pushpad::{DeliveryOptions, Notification, Pushpad, PushpadConfig};
//!
//! let pushpad = Pushpad::new(PushpadConfig::new("token").with_project_id(123))?;
//!
//! let mut notification = Notification::new("Hello world!").with_title("Website Name");
//! pushpad
//!     .notifications()
//!     .deliver_to(&mut notification, vec!["user1", "user2"], &DeliveryOptions::new())
//!     .await?;
//!
//! println!("Sent notification #{:?}", notification.id);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod classify;
mod client;
mod notifications;
mod projects;
pub mod protocol;
mod senders;
mod subscriptions;

pub use client::Pushpad;
pub use notifications::{DeliveryOptions, FindAllOptions, Notifications};
pub use projects::Projects;
pub use senders::Senders;
pub use subscriptions::{SubscriptionQuery, Subscriptions};

pub use pushpad_core::error::{ApiFailure, Operation, PushpadError, Result};
pub use pushpad_core::traits::{HttpResponse, Transport};
pub use pushpad_core::types::*;
pub use pushpad_core::PushpadConfig;
pub use pushpad_http::MockTransport;

pub use chrono;
