//! The client facade.

use std::sync::Arc;

use pushpad_core::error::Result;
use pushpad_core::traits::Transport;
use pushpad_core::PushpadConfig;
use pushpad_http::{Requester, ReqwestTransport};

use crate::notifications::Notifications;
use crate::projects::Projects;
use crate::senders::Senders;
use crate::subscriptions::Subscriptions;

/// Entry point to the Pushpad API.
///
/// Cheap to clone; clones share configuration and transport.
#[derive(Clone, Debug)]
pub struct Pushpad {
    requester: Requester,
}

impl Pushpad {
    /// Creates a client that talks to the service over HTTPS.
    pub fn new(config: PushpadConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client from `PUSHPAD_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(PushpadConfig::from_env()?)
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(config: PushpadConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            requester: Requester::new(Arc::new(config), transport),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &PushpadConfig {
        self.requester.config()
    }

    /// HMAC-SHA1 signature of a uid, keyed with the auth token.
    pub fn signature_for(&self, uid: &str) -> Result<String> {
        pushpad_crypto::sign(self.config(), uid)
    }

    /// Signed link where the user identified by `uid` manages their subscription.
    pub fn subscription_edit_url(&self, uid: &str, project_id: Option<u64>) -> Result<String> {
        pushpad_crypto::subscription_edit_url(self.config(), uid, project_id)
    }

    /// Notification operations.
    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(&self.requester)
    }

    /// Subscription operations.
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(&self.requester)
    }

    /// Project operations.
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(&self.requester)
    }

    /// Sender operations.
    pub fn senders(&self) -> Senders<'_> {
        Senders::new(&self.requester)
    }
}
