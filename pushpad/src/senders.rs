//! Sender management.

use tracing::instrument;

use pushpad_core::constants::{API_V1_PREFIX, STATUS_NO_CONTENT};
use pushpad_core::error::Result;
use pushpad_core::types::{Sender, SenderAttributes};
use pushpad_core::QueryParams;
use pushpad_http::Requester;

use crate::protocol::{self, require_id};

/// Sender operations.
#[derive(Clone, Copy, Debug)]
pub struct Senders<'a> {
    requester: &'a Requester,
}

impl<'a> Senders<'a> {
    pub(crate) fn new(requester: &'a Requester) -> Self {
        Self { requester }
    }

    fn endpoint(&self, id: Option<u64>) -> String {
        let path = match id {
            Some(id) => format!("{API_V1_PREFIX}/senders/{id}"),
            None => format!("{API_V1_PREFIX}/senders"),
        };
        self.requester.config().url(&path)
    }

    /// Creates a sender. Without keys the service generates a VAPID pair.
    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &SenderAttributes) -> Result<Sender> {
        protocol::create(self.requester, &self.endpoint(None), attributes).await
    }

    /// Fetches one sender.
    #[instrument(skip(self))]
    pub async fn find(&self, id: u64) -> Result<Sender> {
        protocol::find(self.requester, &self.endpoint(Some(id))).await
    }

    /// Lists every sender of the account.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Sender>> {
        protocol::find_all(self.requester, &self.endpoint(None), &QueryParams::new()).await
    }

    /// Updates a sender and refreshes it from the response.
    #[instrument(skip(self, sender, attributes), fields(id = ?sender.id))]
    pub async fn update(&self, sender: &mut Sender, attributes: &SenderAttributes) -> Result<()> {
        let endpoint = self.endpoint(Some(require_id(&*sender)?));
        protocol::update(self.requester, &endpoint, attributes, sender).await
    }

    /// Deletes a sender.
    #[instrument(skip(self, sender), fields(id = ?sender.id))]
    pub async fn delete(&self, sender: &Sender) -> Result<()> {
        let endpoint = self.endpoint(Some(require_id(&*sender)?));
        protocol::delete(self.requester, &endpoint, STATUS_NO_CONTENT).await
    }
}
