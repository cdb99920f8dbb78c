//! Project management.

use tracing::instrument;

use pushpad_core::constants::{API_V1_PREFIX, STATUS_ACCEPTED};
use pushpad_core::error::Result;
use pushpad_core::types::{Project, ProjectAttributes};
use pushpad_core::QueryParams;
use pushpad_http::Requester;

use crate::protocol::{self, require_id};

/// Project operations.
#[derive(Clone, Copy, Debug)]
pub struct Projects<'a> {
    requester: &'a Requester,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(requester: &'a Requester) -> Self {
        Self { requester }
    }

    fn endpoint(&self, id: Option<u64>) -> String {
        let path = match id {
            Some(id) => format!("{API_V1_PREFIX}/projects/{id}"),
            None => format!("{API_V1_PREFIX}/projects"),
        };
        self.requester.config().url(&path)
    }

    /// Creates a project.
    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &ProjectAttributes) -> Result<Project> {
        protocol::create(self.requester, &self.endpoint(None), attributes).await
    }

    /// Fetches one project.
    #[instrument(skip(self))]
    pub async fn find(&self, id: u64) -> Result<Project> {
        protocol::find(self.requester, &self.endpoint(Some(id))).await
    }

    /// Lists every project of the account.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Project>> {
        protocol::find_all(self.requester, &self.endpoint(None), &QueryParams::new()).await
    }

    /// Updates a project and refreshes every field from the response.
    #[instrument(skip(self, project, attributes), fields(id = ?project.id))]
    pub async fn update(
        &self,
        project: &mut Project,
        attributes: &ProjectAttributes,
    ) -> Result<()> {
        let endpoint = self.endpoint(Some(require_id(&*project)?));
        protocol::update(self.requester, &endpoint, attributes, project).await
    }

    /// Deletes a project. The service removes it asynchronously.
    #[instrument(skip(self, project), fields(id = ?project.id))]
    pub async fn delete(&self, project: &Project) -> Result<()> {
        let endpoint = self.endpoint(Some(require_id(&*project)?));
        protocol::delete(self.requester, &endpoint, STATUS_ACCEPTED).await
    }
}
