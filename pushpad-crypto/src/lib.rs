//! # Pushpad Cryptography
//!
//! Signatures that let a website hand out links bound to one of its users.
//!
//! This crate provides:
//!
//! - **Signatures**: HMAC-SHA1 over a uid, keyed with the project's auth token
//! - **Links**: the signed "manage subscription" URL embedding `uid` and `uid_signature`
//!
//! ## Example
//!
//! ```rust
//! use pushpad_crypto::signature_for;
//!
//! let sig = signature_for("abc123", "myuid1");
//! assert_eq!(sig, "27fbe136f5a4aa0b6be74c0e18fa8ce81ad91b60");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod signature;

pub use signature::{sign, signature_for, subscription_edit_url, verify_signature};
