//! A detected repository bound to an authenticated API client.

use std::sync::Arc;

use beanstalk_core::api::HostedApi;
use beanstalk_core::release::{Environment, Release, RemoteHeads};
use beanstalk_core::{EnvironmentId, Error, RepositoryId, RepositoryIdentity, Result};
use beanstalk_vcs::RepositoryDetector;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// One repository for the duration of a workflow run.
///
/// The hosted repository id is looked up on first use and kept for the
/// session's lifetime.
pub struct RepositorySession {
    identity: RepositoryIdentity,
    api: Arc<dyn HostedApi>,
    detector: RepositoryDetector,
    repository_id: OnceCell<Option<RepositoryId>>,
}

impl RepositorySession {
    pub fn new(
        identity: RepositoryIdentity,
        api: Arc<dyn HostedApi>,
        detector: RepositoryDetector,
    ) -> Self {
        Self {
            identity,
            api,
            detector,
            repository_id: OnceCell::new(),
        }
    }

    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// Hosted id of the repository, `None` when no repository carries its
    /// name exactly once.
    pub async fn repository_id(&self) -> Result<Option<RepositoryId>> {
        let id = self
            .repository_id
            .get_or_try_init(|| async {
                let id = self.api.find_repository_id(self.identity.name()).await?;
                debug!(repository = %self.identity.name(), id = ?id, "Resolved repository id");
                Ok::<_, Error>(id)
            })
            .await?;

        Ok(*id)
    }

    /// Server environments of the repository; empty when the repository is
    /// unknown to the service.
    pub async fn environments(&self) -> Result<Vec<Environment>> {
        match self.repository_id().await? {
            Some(id) => self.api.list_environments(id).await,
            None => {
                warn!(repository = %self.identity.name(), "Repository not found on the service");
                Ok(Vec::new())
            }
        }
    }

    pub async fn remote_heads(&self) -> Result<RemoteHeads> {
        Ok(self.detector.remote_heads(&self.identity).await?)
    }

    pub async fn release(
        &self,
        environment_id: EnvironmentId,
        revision: &str,
        message: &str,
    ) -> Result<Release> {
        let id = self
            .repository_id()
            .await?
            .ok_or_else(|| Error::RepositoryNotFound(self.identity.name().to_string()))?;

        self.api
            .create_release(id, environment_id, revision, message)
            .await
    }
}
