//! Subscriptions of a project: count, list, lookup, create, update, delete.

use tracing::{debug, instrument};

use pushpad_core::constants::{
    API_V1_PREFIX, PAGE_PARAM, STATUS_NO_CONTENT, STATUS_OK, TOTAL_COUNT_HEADER,
};
use pushpad_core::error::{Operation, PushpadError, Result};
use pushpad_core::types::{AudienceFilter, Subscription, SubscriptionAttributes, Tags};
use pushpad_http::Requester;

use crate::classify::expect_status;
use crate::protocol::{self, require_id};

/// Filters for counting and listing subscriptions.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionQuery {
    /// Project override
    pub project_id: Option<u64>,
    /// 1-based page (ignored by `count`)
    pub page: Option<u64>,
    /// Uid and tag filters
    pub audience: AudienceFilter,
}

impl SubscriptionQuery {
    /// Everyone in the configured project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project.
    pub fn with_project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the page.
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Restricts to these uids.
    pub fn with_uids<I, S>(mut self, uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audience = self.audience.with_uids(uids);
        self
    }

    /// Restricts to these tags.
    pub fn with_tags(mut self, tags: impl Into<Tags>) -> Self {
        self.audience = self.audience.with_tags(tags);
        self
    }
}

/// Subscription operations.
#[derive(Clone, Copy, Debug)]
pub struct Subscriptions<'a> {
    requester: &'a Requester,
}

impl<'a> Subscriptions<'a> {
    pub(crate) fn new(requester: &'a Requester) -> Self {
        Self { requester }
    }

    fn collection(&self, project_id: Option<u64>) -> Result<String> {
        let config = self.requester.config();
        let project_id = config.resolve_project_id(project_id)?;
        Ok(config.url(&format!("{API_V1_PREFIX}/projects/{project_id}/subscriptions")))
    }

    fn member(&self, subscription: &Subscription, project_id: Option<u64>) -> Result<String> {
        let id = require_id(subscription)?;
        Ok(format!("{}/{id}", self.collection(project_id)?))
    }

    /// Number of matching subscriptions, read from the total count header.
    #[instrument(skip(self))]
    pub async fn count(&self, query: &SubscriptionQuery) -> Result<u64> {
        let endpoint = self.collection(query.project_id)?;
        let response = self
            .requester
            .head(&endpoint, &query.audience.query_params())
            .await?;
        let response = expect_status(Operation::Count, STATUS_OK, response)?;

        let raw = response.header(TOTAL_COUNT_HEADER).ok_or_else(|| {
            PushpadError::InvalidResponse(format!("missing {TOTAL_COUNT_HEADER} header"))
        })?;
        let count = raw.trim().parse::<u64>().map_err(|_| {
            PushpadError::InvalidResponse(format!("{TOTAL_COUNT_HEADER} is not a number: {raw}"))
        })?;

        debug!(count, "Counted subscriptions");
        Ok(count)
    }

    /// Lists matching subscriptions; filters first, then the page.
    #[instrument(skip(self))]
    pub async fn find_all(&self, query: &SubscriptionQuery) -> Result<Vec<Subscription>> {
        let endpoint = self.collection(query.project_id)?;
        let mut params = query.audience.query_params();
        if let Some(page) = query.page {
            params.push(PAGE_PARAM, page);
        }
        protocol::find_all(self.requester, &endpoint, &params).await
    }

    /// Fetches one subscription.
    #[instrument(skip(self))]
    pub async fn find(&self, id: u64, project_id: Option<u64>) -> Result<Subscription> {
        let endpoint = format!("{}/{id}", self.collection(project_id)?);
        protocol::find(self.requester, &endpoint).await
    }

    /// Registers a subscription, e.g. one imported from another provider.
    #[instrument(skip(self, attributes))]
    pub async fn create(
        &self,
        attributes: &SubscriptionAttributes,
        project_id: Option<u64>,
    ) -> Result<Subscription> {
        let endpoint = self.collection(project_id)?;
        protocol::create(self.requester, &endpoint, attributes).await
    }

    /// Changes uid or tags and refreshes `subscription` from the response.
    #[instrument(skip(self, subscription, attributes), fields(id = ?subscription.id))]
    pub async fn update(
        &self,
        subscription: &mut Subscription,
        attributes: &SubscriptionAttributes,
        project_id: Option<u64>,
    ) -> Result<()> {
        let endpoint = self.member(subscription, project_id)?;
        protocol::update(self.requester, &endpoint, attributes, subscription).await
    }

    /// Removes a subscription.
    #[instrument(skip(self, subscription), fields(id = ?subscription.id))]
    pub async fn delete(&self, subscription: &Subscription, project_id: Option<u64>) -> Result<()> {
        let endpoint = self.member(subscription, project_id)?;
        protocol::delete(self.requester, &endpoint, STATUS_NO_CONTENT).await
    }
}
