//! Projects (one website or app each).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Server id
    pub id: Option<u64>,
    /// Sender whose VAPID keys sign the pushes
    pub sender_id: Option<u64>,
    /// Name
    pub name: Option<String>,
    /// Website URL
    pub website: Option<String>,
    /// Default notification icon
    pub icon_url: Option<String>,
    /// Default notification badge
    pub badge_url: Option<String>,
    /// Default notification time to live
    pub notifications_ttl: Option<u64>,
    /// Default require-interaction
    pub notifications_require_interaction: Option<bool>,
    /// Default silent
    pub notifications_silent: Option<bool>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Local handle to an existing project, for update/delete.
    pub fn with_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

/// Attributes sent on create/update; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ProjectAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_require_interaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_silent: Option<bool>,
}

impl ProjectAttributes {
    /// Attributes required to create a project.
    pub fn new(sender_id: u64, name: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            sender_id: Some(sender_id),
            name: Some(name.into()),
            website: Some(website.into()),
            ..Default::default()
        }
    }

    /// Only a new name.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}
