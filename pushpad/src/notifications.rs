//! Notification delivery, lookup and cancellation.
//!
//! Delivery mutates the caller's notification: the id and scheduled count
//! returned by the service overwrite the local ones. Notifications obtained
//! through [`Notifications::find`] or [`Notifications::find_all`] are
//! read-only and refuse delivery before any request is made.

use serde_json::Value;
use tracing::{debug, instrument};

use pushpad_core::constants::{PAGE_PARAM, STATUS_CREATED, STATUS_NO_CONTENT};
use pushpad_core::error::{Operation, Result};
use pushpad_core::types::{DeliveryReceipt, Notification, Recipients, Tags};
use pushpad_core::QueryParams;
use pushpad_http::Requester;

use crate::classify::{decode, expect_status};
use crate::protocol::{self, require_id};

/// Options shared by broadcasts and targeted deliveries.
#[derive(Clone, Debug, Default)]
pub struct DeliveryOptions {
    /// Project override; falls back to the configured project
    pub project_id: Option<u64>,
    /// Restrict delivery to subscriptions matching these tags
    pub tags: Option<Tags>,
}

impl DeliveryOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project.
    pub fn with_project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the tag filter.
    pub fn with_tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = Some(tags.into());
        self
    }
}

/// Options for listing notifications.
#[derive(Clone, Debug, Default)]
pub struct FindAllOptions {
    /// Project override
    pub project_id: Option<u64>,
    /// 1-based page
    pub page: Option<u64>,
}

/// Notification operations.
#[derive(Clone, Copy, Debug)]
pub struct Notifications<'a> {
    requester: &'a Requester,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(requester: &'a Requester) -> Self {
        Self { requester }
    }

    /// Fetches one notification. The result is read-only.
    #[instrument(skip(self))]
    pub async fn find(&self, id: u64) -> Result<Notification> {
        let endpoint = self.requester.config().url(&format!("/notifications/{id}"));
        let notification: Notification = protocol::find(self.requester, &endpoint).await?;
        Ok(notification.into_read_only())
    }

    /// Lists the notifications of a project, newest first. Results are read-only.
    #[instrument(skip(self))]
    pub async fn find_all(&self, options: &FindAllOptions) -> Result<Vec<Notification>> {
        let project_id = self.requester.config().resolve_project_id(options.project_id)?;
        let endpoint = self
            .requester
            .config()
            .url(&format!("/projects/{project_id}/notifications"));

        let mut query = QueryParams::new();
        if let Some(page) = options.page {
            query.push(PAGE_PARAM, page);
        }

        let notifications: Vec<Notification> =
            protocol::find_all(self.requester, &endpoint, &query).await?;
        Ok(notifications
            .into_iter()
            .map(Notification::into_read_only)
            .collect())
    }

    /// Sends to every subscriber of the project (or those matching `tags`).
    ///
    /// Returns the decoded response body.
    pub async fn broadcast(
        &self,
        notification: &mut Notification,
        options: &DeliveryOptions,
    ) -> Result<Value> {
        self.deliver(notification, None, options).await
    }

    /// Sends to specific users.
    ///
    /// `recipients` may be a single uid, a list of uids, or anything
    /// implementing [`UidSource`](pushpad_core::types::UidSource).
    pub async fn deliver_to<'r>(
        &self,
        notification: &mut Notification,
        recipients: impl Into<Recipients<'r>>,
        options: &DeliveryOptions,
    ) -> Result<Value> {
        let uids = recipients.into().into_uids();
        self.deliver(notification, Some(uids), options).await
    }

    /// Cancels a scheduled notification.
    #[instrument(skip(self, notification), fields(id = ?notification.id))]
    pub async fn cancel(&self, notification: &Notification) -> Result<()> {
        let id = require_id(notification)?;
        let endpoint = self
            .requester
            .config()
            .url(&format!("/notifications/{id}/cancel"));

        let response = self.requester.delete(&endpoint, &QueryParams::new()).await?;
        expect_status(Operation::Cancel, STATUS_NO_CONTENT, response)?;
        Ok(())
    }

    #[instrument(skip_all, fields(uids = ?uids.as_ref().map(Vec::len)))]
    async fn deliver(
        &self,
        notification: &mut Notification,
        uids: Option<Vec<String>>,
        options: &DeliveryOptions,
    ) -> Result<Value> {
        notification.ensure_deliverable()?;
        let project_id = self.requester.config().resolve_project_id(options.project_id)?;
        let endpoint = self
            .requester
            .config()
            .url(&format!("/projects/{project_id}/notifications"));

        let body = serde_json::to_string(
            &notification.delivery_request(uids.as_deref(), options.tags.as_ref()),
        )?;
        let response = self.requester.post(&endpoint, &QueryParams::new(), body).await?;
        let response = expect_status(Operation::Deliver, STATUS_CREATED, response)?;

        let value: Value = decode(&response)?;
        let receipt: DeliveryReceipt = serde_json::from_value(value.clone())?;
        notification.record_delivery(receipt.id, receipt.scheduled);
        debug!(id = ?receipt.id, scheduled = ?receipt.scheduled, "Notification delivered");

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use pushpad_core::error::PushpadError;
    use pushpad_core::traits::HttpMethod;
    use pushpad_core::types::{NotificationState, UidSource};
    use pushpad_core::PushpadConfig;
    use pushpad_http::MockTransport;

    struct Team(Vec<&'static str>);

    impl UidSource for Team {
        fn ids(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    fn requester(config: PushpadConfig) -> (Requester, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        (Requester::new(Arc::new(config), mock.clone()), mock)
    }

    fn configured() -> (Requester, Arc<MockTransport>) {
        requester(PushpadConfig::new("abc123").with_project_id(123))
    }

    fn sent_body(mock: &MockTransport) -> Value {
        let request = mock.last_request().unwrap();
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_broadcast() {
        let (req, mock) = configured();
        mock.push_json(201, r#"{"id":123456789,"scheduled":5}"#);

        let mut n = Notification::new("Example message").with_title("Title");
        let result = Notifications::new(&req)
            .broadcast(&mut n, &DeliveryOptions::new())
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://pushpad.xyz/projects/123/notifications");
        assert_eq!(
            sent_body(&mock),
            json!({ "notification": { "body": "Example message", "title": "Title" } })
        );
        assert_eq!(result, json!({ "id": 123456789, "scheduled": 5 }));
        assert_eq!(n.id, Some(123456789));
        assert_eq!(n.scheduled_count, Some(5));
        assert_eq!(n.state(), NotificationState::Delivered);
    }

    #[tokio::test]
    async fn test_broadcast_with_tags_and_project_override() {
        let (req, mock) = configured();
        mock.push_json(201, r#"{"id":1,"scheduled":0}"#);

        let options = DeliveryOptions::new()
            .with_project_id(5)
            .with_tags(Tags::list(["sports", "travel"]));
        let mut n = Notification::new("m");
        Notifications::new(&req).broadcast(&mut n, &options).await.unwrap();

        assert_eq!(
            mock.last_request().unwrap().url,
            "https://pushpad.xyz/projects/5/notifications"
        );
        assert_eq!(sent_body(&mock)["tags"], json!(["sports", "travel"]));
        assert!(sent_body(&mock).get("uids").is_none());
    }

    #[tokio::test]
    async fn test_recipient_shapes_produce_identical_bodies() {
        let (req, mock) = configured();
        for _ in 0..3 {
            mock.push_json(201, r#"{"id":1,"scheduled":1}"#);
        }
        let notifications = Notifications::new(&req);
        let options = DeliveryOptions::new();

        notifications
            .deliver_to(&mut Notification::new("m"), vec!["u1", "u2"], &options)
            .await
            .unwrap();
        notifications
            .deliver_to(&mut Notification::new("m"), &Team(vec!["u1", "u2"]), &options)
            .await
            .unwrap();
        notifications
            .deliver_to(&mut Notification::new("m"), "u1", &options)
            .await
            .unwrap();

        let bodies: Vec<Value> = mock
            .requests()
            .iter()
            .map(|r| serde_json::from_str(r.body.as_deref().unwrap()).unwrap())
            .collect();
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0]["uids"], json!(["u1", "u2"]));
        assert_eq!(bodies[2]["uids"], json!(["u1"]));
    }

    #[tokio::test]
    async fn test_tag_expression_sent_as_string() {
        let (req, mock) = configured();
        mock.push_json(201, r#"{"id":1,"scheduled":1}"#);

        let options = DeliveryOptions::new().with_tags("sports && !travel");
        Notifications::new(&req)
            .deliver_to(&mut Notification::new("m"), 42u64, &options)
            .await
            .unwrap();

        let body = sent_body(&mock);
        assert_eq!(body["uids"], json!(["42"]));
        assert_eq!(body["tags"], json!("sports && !travel"));
    }

    #[tokio::test]
    async fn test_found_notification_is_read_only() {
        let (req, mock) = configured();
        mock.push_json(200, r#"{"id":42,"body":"Hello","scheduled_count":3}"#);
        let notifications = Notifications::new(&req);

        let mut n = notifications.find(42).await.unwrap();
        assert_eq!(mock.last_request().unwrap().url, "https://pushpad.xyz/notifications/42");
        assert!(n.is_read_only());
        assert_eq!(n.scheduled_count, Some(3));

        let err = notifications
            .broadcast(&mut n, &DeliveryOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PushpadError::ReadOnly));
        let err = notifications
            .deliver_to(&mut n, "u1", &DeliveryOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PushpadError::ReadOnly));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_find_all_is_read_only_and_paginated() {
        let (req, mock) = configured();
        mock.push_json(200, r#"[{"id":2,"body":"b"},{"id":1,"body":"a"}]"#);

        let options = FindAllOptions {
            page: Some(2),
            ..Default::default()
        };
        let found = Notifications::new(&req).find_all(&options).await.unwrap();

        assert_eq!(
            mock.last_request().unwrap().url,
            "https://pushpad.xyz/projects/123/notifications?page=2"
        );
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, Some(2));
        assert!(found.iter().all(Notification::is_read_only));
    }

    #[tokio::test]
    async fn test_fresh_with_caller_id_delivers_and_redelivery_overwrites() {
        let (req, mock) = configured();
        mock.push_json(201, r#"{"id":10,"scheduled":4}"#);
        mock.push_json(201, r#"{"id":11}"#);
        let notifications = Notifications::new(&req);

        let mut n = Notification::new("m").with_id(999);
        notifications.broadcast(&mut n, &DeliveryOptions::new()).await.unwrap();
        assert_eq!((n.id, n.scheduled_count), (Some(10), Some(4)));

        notifications.broadcast(&mut n, &DeliveryOptions::new()).await.unwrap();
        assert_eq!((n.id, n.scheduled_count), (Some(11), None));
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_project_id_makes_no_request() {
        let (req, mock) = requester(PushpadConfig::new("abc123"));

        let err = Notifications::new(&req)
            .broadcast(&mut Notification::new("m"), &DeliveryOptions::new())
            .await
            .unwrap_err();

        assert!(err.is_config_error());
        assert!(err.to_string().contains("must set project_id"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delivery_error_keeps_local_state() {
        let (req, mock) = configured();
        mock.push_response(
            pushpad_core::HttpResponse::new(403, r#"{"error":"Forbidden"}"#)
                .with_reason("Forbidden"),
        );

        let mut n = Notification::new("m");
        let err = Notifications::new(&req)
            .broadcast(&mut n, &DeliveryOptions::new())
            .await
            .unwrap_err();

        assert!(matches!(err, PushpadError::DeliveryError(_)));
        assert_eq!(err.status(), Some(403));
        assert_eq!(n.state(), NotificationState::Fresh);
        assert_eq!(n.id, None);
    }

    #[tokio::test]
    async fn test_cancel() {
        let (req, mock) = configured();
        mock.push_status(204);
        mock.push_status(404);
        let notifications = Notifications::new(&req);

        let n = Notification::new("m").with_id(77);
        notifications.cancel(&n).await.unwrap();
        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "https://pushpad.xyz/notifications/77/cancel");

        let err = notifications.cancel(&n).await.unwrap_err();
        assert!(matches!(err, PushpadError::CancelError(_)));
    }

    #[tokio::test]
    async fn test_cancel_found_notification() {
        let (req, mock) = configured();
        mock.push_json(200, r#"{"id":42,"body":"Hello","send_at":"2030-01-01T10:00:00Z"}"#);
        mock.push_status(204);
        let notifications = Notifications::new(&req);

        let n = notifications.find(42).await.unwrap();
        assert!(n.is_read_only());
        notifications.cancel(&n).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "https://pushpad.xyz/notifications/42/cancel");
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_find_error() {
        let (req, mock) = configured();
        mock.push_response(
            pushpad_core::HttpResponse::new(404, r#"{"error":"Not Found"}"#)
                .with_reason("Not Found"),
        );

        let err = Notifications::new(&req).find(404).await.unwrap_err();

        assert!(matches!(err, PushpadError::FindError(_)));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.api_failure().unwrap().body, r#"{"error":"Not Found"}"#);
    }

    #[tokio::test]
    async fn test_cancel_without_id_makes_no_request() {
        let (req, mock) = configured();

        let err = Notifications::new(&req)
            .cancel(&Notification::new("m"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("must set id"));
        assert_eq!(mock.request_count(), 0);
    }
}
