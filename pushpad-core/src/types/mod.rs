//! Domain types for Pushpad.
//!
//! This module provides the resources and request inputs used throughout the client:
//!
//! - [`Notification`]: Push message with its delivery state
//! - [`Subscription`]: A browser push subscription of a project
//! - [`Project`] / [`Sender`]: Account-level resources
//! - [`AudienceFilter`]: uid/tag filters rendered as query parameters
//! - [`Recipients`]: Target users of a delivery

mod audience;
mod notification;
mod project;
mod recipients;
mod sender;
mod subscription;

pub use audience::*;
pub use notification::*;
pub use project::*;
pub use recipients::*;
pub use sender::*;
pub use subscription::*;
