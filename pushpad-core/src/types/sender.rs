//! Senders: the VAPID identity used to sign pushes.
//!
//! The key pair is opaque to the client; it is only stored and transported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sender.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sender {
    /// Server id
    pub id: Option<u64>,
    /// Name
    pub name: Option<String>,
    /// VAPID private key (PEM)
    pub vapid_private_key: Option<String>,
    /// VAPID public key (base64url)
    pub vapid_public_key: Option<String>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sender")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("vapid_private_key", &self.vapid_private_key.as_ref().map(|_| "[REDACTED]"))
            .field("vapid_public_key", &self.vapid_public_key)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Sender {
    /// Local handle to an existing sender, for update/delete.
    pub fn with_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

/// Attributes sent on create/update; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderAttributes {
    /// Name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// VAPID private key; generated by the service when omitted on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vapid_private_key: Option<String>,
    /// VAPID public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vapid_public_key: Option<String>,
}

impl SenderAttributes {
    /// Attributes with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Imports an existing VAPID key pair.
    pub fn with_vapid_keys(
        mut self,
        private_key: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        self.vapid_private_key = Some(private_key.into());
        self.vapid_public_key = Some(public_key.into());
        self
    }
}
