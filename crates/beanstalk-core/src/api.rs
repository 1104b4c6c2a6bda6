//! Hosted service API abstraction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::id::{EnvironmentId, RepositoryId};
use crate::identity::Credentials;
use crate::release::{Environment, Release, RemoteRepository};

/// Authenticated access to the hosted service's REST API.
#[async_trait]
pub trait HostedApi: Send + Sync {
    /// List every repository of the account.
    async fn list_repositories(&self) -> Result<Vec<RemoteRepository>>;

    /// List the server environments of a repository.
    async fn list_environments(&self, repository_id: RepositoryId) -> Result<Vec<Environment>>;

    /// Create a release of `revision` to an environment.
    async fn create_release(
        &self,
        repository_id: RepositoryId,
        environment_id: EnvironmentId,
        revision: &str,
        comment: &str,
    ) -> Result<Release>;

    /// Find a repository id by exact name.
    ///
    /// Returns `None` when no repository, or more than one, carries the name.
    async fn find_repository_id(&self, name: &str) -> Result<Option<RepositoryId>> {
        let repositories = self.list_repositories().await?;
        let mut matches = repositories.iter().filter(|r| r.name == name);

        match (matches.next(), matches.next()) {
            (Some(repository), None) => Ok(Some(repository.id)),
            _ => Ok(None),
        }
    }
}

/// Builds API clients for an account.
pub trait HostedApiFactory: Send + Sync {
    fn connect(&self, account: &str, credentials: &Credentials) -> Result<Arc<dyn HostedApi>>;
}
