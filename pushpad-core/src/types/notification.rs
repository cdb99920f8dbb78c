//! Notification resource and its delivery state.
//!
//! A notification built by the caller is `Fresh` and may be delivered; after
//! a successful delivery it is `Delivered` and may be delivered again. One
//! obtained through a lookup is `ReadOnly` and can never be delivered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SEND_AT_FORMAT;
use crate::error::{PushpadError, Result};
use crate::types::Tags;

/// Delivery state of a notification instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotificationState {
    /// Built locally, not sent yet.
    #[default]
    Fresh,
    /// Sent at least once from this instance.
    Delivered,
    /// Snapshot returned by a lookup; delivery is refused.
    ReadOnly,
}

/// Action button shown with a notification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationAction {
    /// Button label
    pub title: String,
    /// URL opened when the button is clicked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    /// Button icon URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Action identifier reported back on click
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl NotificationAction {
    /// Creates an action with a label.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the target URL.
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = Some(url.into());
        self
    }

    /// Sets the icon URL.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the action identifier.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// A push notification.
///
/// Attribute fields are public for reading; the delivery state is private
/// and only moves forward (`Fresh` → `Delivered`, lookups → `ReadOnly`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    /// Server id, set by delivery or lookup (a caller-supplied id does not block delivery)
    pub id: Option<u64>,
    /// Message body (required by the service)
    pub body: String,
    /// Title
    pub title: Option<String>,
    /// URL opened on click
    pub target_url: Option<String>,
    /// Icon URL
    pub icon_url: Option<String>,
    /// Badge URL
    pub badge_url: Option<String>,
    /// Large image URL
    pub image_url: Option<String>,
    /// Time to live in seconds
    pub ttl: Option<u64>,
    /// Keep the notification on screen until the user interacts
    pub require_interaction: Option<bool>,
    /// Show without sound or vibration
    pub silent: Option<bool>,
    /// Send with high priority
    pub urgent: Option<bool>,
    /// Opaque data handed to the service worker
    pub custom_data: Option<String>,
    /// Custom metric names tracked for this notification
    pub custom_metrics: Option<Vec<String>>,
    /// Action buttons
    pub actions: Option<Vec<NotificationAction>>,
    /// Starred in the dashboard
    pub starred: Option<bool>,
    /// Scheduled send time (transmitted with minute precision)
    pub send_at: Option<DateTime<Utc>>,
    /// Creation time (server)
    pub created_at: Option<DateTime<Utc>>,
    /// Subscriptions the notification was scheduled for (server)
    pub scheduled_count: Option<u64>,
    /// Successful pushes (server)
    pub successfully_sent_count: Option<u64>,
    /// Opens (server)
    pub opened_count: Option<u64>,

    #[serde(skip)]
    state: NotificationState,
}

impl Notification {
    /// Creates a fresh notification with a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Sets an id; the instance stays deliverable.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the click target.
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = Some(url.into());
        self
    }

    /// Sets the icon.
    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    /// Sets the badge.
    pub fn with_badge_url(mut self, url: impl Into<String>) -> Self {
        self.badge_url = Some(url.into());
        self
    }

    /// Sets the image.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the time to live in seconds.
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets require-interaction.
    pub fn with_require_interaction(mut self, value: bool) -> Self {
        self.require_interaction = Some(value);
        self
    }

    /// Sets silent.
    pub fn with_silent(mut self, value: bool) -> Self {
        self.silent = Some(value);
        self
    }

    /// Sets urgent.
    pub fn with_urgent(mut self, value: bool) -> Self {
        self.urgent = Some(value);
        self
    }

    /// Sets custom data.
    pub fn with_custom_data(mut self, data: impl Into<String>) -> Self {
        self.custom_data = Some(data.into());
        self
    }

    /// Sets custom metrics.
    pub fn with_custom_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_metrics = Some(metrics.into_iter().map(Into::into).collect());
        self
    }

    /// Appends an action button.
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(action);
        self
    }

    /// Sets starred.
    pub fn with_starred(mut self, value: bool) -> Self {
        self.starred = Some(value);
        self
    }

    /// Schedules the notification.
    pub fn with_send_at(mut self, send_at: DateTime<Utc>) -> Self {
        self.send_at = Some(send_at);
        self
    }

    /// Current delivery state.
    pub fn state(&self) -> NotificationState {
        self.state
    }

    /// True if this instance came from a lookup.
    pub fn is_read_only(&self) -> bool {
        self.state == NotificationState::ReadOnly
    }

    /// Marks a lookup result as read-only. There is no way back.
    pub fn into_read_only(mut self) -> Self {
        self.state = NotificationState::ReadOnly;
        self
    }

    /// Fails with [`PushpadError::ReadOnly`] if delivery is not allowed.
    pub fn ensure_deliverable(&self) -> Result<()> {
        if self.is_read_only() {
            return Err(PushpadError::ReadOnly);
        }
        Ok(())
    }

    /// Applies a successful delivery: both values are overwritten.
    pub fn record_delivery(&mut self, id: Option<u64>, scheduled_count: Option<u64>) {
        self.id = id;
        self.scheduled_count = scheduled_count;
        if self.state == NotificationState::Fresh {
            self.state = NotificationState::Delivered;
        }
    }

    /// Builds the delivery request body for this notification.
    pub fn delivery_request<'a>(
        &'a self,
        uids: Option<&'a [String]>,
        tags: Option<&'a Tags>,
    ) -> DeliveryRequest<'a> {
        DeliveryRequest {
            notification: NotificationPayload {
                body: &self.body,
                title: self.title.as_deref(),
                target_url: self.target_url.as_deref(),
                icon_url: self.icon_url.as_deref(),
                badge_url: self.badge_url.as_deref(),
                image_url: self.image_url.as_deref(),
                ttl: self.ttl,
                require_interaction: self.require_interaction,
                silent: self.silent,
                urgent: self.urgent,
                custom_data: self.custom_data.as_deref(),
                custom_metrics: self.custom_metrics.as_deref(),
                actions: self.actions.as_deref(),
                starred: self.starred,
                send_at: self.send_at.map(|t| t.format(SEND_AT_FORMAT).to_string()),
            },
            uids,
            tags,
        }
    }
}

/// JSON body of a delivery call.
#[derive(Debug, Serialize)]
pub struct DeliveryRequest<'a> {
    /// Notification fields that are set
    pub notification: NotificationPayload<'a>,
    /// Target uids (absent for broadcasts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uids: Option<&'a [String]>,
    /// Tag filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a Tags>,
}

/// Notification fields as sent to the service; unset fields are omitted.
#[derive(Debug, Serialize)]
#[allow(missing_docs)]
pub struct NotificationPayload<'a> {
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_interaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metrics: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<&'a [NotificationAction]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<String>,
}

/// Fields of a delivery response that update the local instance.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeliveryReceipt {
    /// Id of the created notification
    pub id: Option<u64>,
    /// Number of subscriptions scheduled
    pub scheduled: Option<u64>,
}
