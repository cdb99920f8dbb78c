//! Generic resource operations.
//!
//! Every resource follows the same lifecycle: create with POST (201), read
//! with GET (200), update with PATCH (200, full refresh) and delete with
//! DELETE. Handles in the sibling modules only supply endpoints and the
//! per-resource delete status.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use pushpad_core::constants::{STATUS_CREATED, STATUS_OK};
use pushpad_core::error::{Operation, PushpadError, Result};
use pushpad_core::types::{Notification, Project, Sender, Subscription};
use pushpad_core::QueryParams;
use pushpad_http::Requester;

use crate::classify::{decode, expect_status};

/// A server-side entity addressed by a numeric id.
pub trait Resource: DeserializeOwned + Send {
    /// Server id, if known.
    fn id(&self) -> Option<u64>;
}

impl Resource for Notification {
    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl Resource for Subscription {
    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl Resource for Project {
    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl Resource for Sender {
    fn id(&self) -> Option<u64> {
        self.id
    }
}

/// Returns the id of a resource, failing locally if it has none.
pub fn require_id<R: Resource>(resource: &R) -> Result<u64> {
    resource.id().ok_or_else(|| PushpadError::missing("id"))
}

/// POSTs attributes and decodes the created resource.
#[instrument(skip(requester, attributes))]
pub async fn create<A, R>(requester: &Requester, endpoint: &str, attributes: &A) -> Result<R>
where
    A: Serialize + ?Sized + Sync,
    R: Resource,
{
    let body = serde_json::to_string(attributes)?;
    let response = requester.post(endpoint, &QueryParams::new(), body).await?;
    let response = expect_status(Operation::Create, STATUS_CREATED, response)?;
    decode(&response)
}

/// GETs a single resource.
#[instrument(skip(requester))]
pub async fn find<R: Resource>(requester: &Requester, endpoint: &str) -> Result<R> {
    let response = requester.get(endpoint, &QueryParams::new()).await?;
    let response = expect_status(Operation::Find, STATUS_OK, response)?;
    decode(&response)
}

/// GETs a collection, in server order.
#[instrument(skip(requester, query))]
pub async fn find_all<R: Resource>(
    requester: &Requester,
    endpoint: &str,
    query: &QueryParams,
) -> Result<Vec<R>> {
    let response = requester.get(endpoint, query).await?;
    let response = expect_status(Operation::Find, STATUS_OK, response)?;
    let items: Vec<R> = decode(&response)?;
    debug!(count = items.len(), "Fetched collection");
    Ok(items)
}

/// PATCHes attributes and replaces `target` with the server's view of it.
#[instrument(skip(requester, attributes, target))]
pub async fn update<A, R>(
    requester: &Requester,
    endpoint: &str,
    attributes: &A,
    target: &mut R,
) -> Result<()>
where
    A: Serialize + ?Sized + Sync,
    R: Resource,
{
    let body = serde_json::to_string(attributes)?;
    let response = requester.patch(endpoint, &QueryParams::new(), body).await?;
    let response = expect_status(Operation::Update, STATUS_OK, response)?;
    *target = decode(&response)?;
    Ok(())
}

/// DELETEs a resource; `expected` differs per resource.
#[instrument(skip(requester))]
pub async fn delete(requester: &Requester, endpoint: &str, expected: u16) -> Result<()> {
    let response = requester.delete(endpoint, &QueryParams::new()).await?;
    expect_status(Operation::Delete, expected, response)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use pushpad_core::PushpadConfig;
    use pushpad_http::MockTransport;

    fn requester() -> (Requester, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let config = Arc::new(PushpadConfig::new("abc123"));
        (Requester::new(config, mock.clone()), mock)
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(&Project::with_id(7)).unwrap(), 7);

        let err = require_id(&Project::default()).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("must set id"));
    }

    #[tokio::test]
    async fn test_update_replaces_whole_value() {
        let (req, mock) = requester();
        mock.push_json(200, r#"{"id":3,"name":"Renamed"}"#);

        let mut sender = Sender {
            vapid_public_key: Some("stale".into()),
            ..Sender::with_id(3)
        };
        update(
            &req,
            "https://pushpad.xyz/api/v1/senders/3",
            &serde_json::json!({"name": "Renamed"}),
            &mut sender,
        )
        .await
        .unwrap();

        assert_eq!(sender.name.as_deref(), Some("Renamed"));
        // fields absent from the response are reset too
        assert_eq!(sender.vapid_public_key, None);
    }

    #[tokio::test]
    async fn test_update_failure_leaves_value_untouched() {
        let (req, mock) = requester();
        mock.push_json(422, r#"{"errors":{}}"#);

        let mut project = Project::with_id(1);
        let err = update(
            &req,
            "https://pushpad.xyz/api/v1/projects/1",
            &serde_json::json!({}),
            &mut project,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PushpadError::UpdateError(_)));
        assert_eq!(project, Project::with_id(1));
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let (req, mock) = requester();
        mock.push_json(200, "[]");

        let items: Vec<Project> =
            find_all(&req, "https://pushpad.xyz/api/v1/projects", &QueryParams::new())
                .await
                .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_expected_status() {
        let (req, mock) = requester();
        mock.push_status(204);
        mock.push_status(204);

        delete(&req, "https://pushpad.xyz/api/v1/senders/1", 204).await.unwrap();
        let err = delete(&req, "https://pushpad.xyz/api/v1/projects/1", 202).await.unwrap_err();
        assert!(matches!(err, PushpadError::DeleteError(_)));
    }
}
