//! Push subscriptions of a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A browser push subscription.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    /// Server id
    pub id: Option<u64>,
    /// Push service endpoint URL
    pub endpoint: Option<String>,
    /// Browser public key (P-256 ECDH)
    pub p256dh: Option<String>,
    /// Browser auth secret
    pub auth: Option<String>,
    /// User identifier
    pub uid: Option<String>,
    /// Tags (`null` decodes as empty)
    #[serde(deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    /// Last notification click
    pub last_click_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Attributes sent on create/update; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionAttributes {
    /// Push service endpoint URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Browser public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p256dh: Option<String>,
    /// Browser auth secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    /// User identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Tags (replaces the whole set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SubscriptionAttributes {
    /// Attributes of a new subscription.
    pub fn new(
        endpoint: impl Into<String>,
        p256dh: impl Into<String>,
        auth: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            p256dh: Some(p256dh.into()),
            auth: Some(auth.into()),
            ..Default::default()
        }
    }

    /// Sets the uid.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Sets the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_attributes_omit_unset() {
        let attrs = SubscriptionAttributes {
            uid: Some("u2".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&attrs).unwrap(), json!({ "uid": "u2" }));
    }

    #[test]
    fn test_decode_minimal() {
        let s: Subscription = serde_json::from_value(json!({ "id": 5 })).unwrap();
        assert_eq!(s.id, Some(5));
        assert!(s.tags.is_empty());
        assert!(s.uid.is_none());
    }

    #[test]
    fn test_decode_null_tags() {
        let s: Subscription =
            serde_json::from_value(json!({ "id": 1, "uid": null, "tags": null })).unwrap();
        assert_eq!(s.id, Some(1));
        assert!(s.tags.is_empty());
        assert!(s.uid.is_none());
    }
}
