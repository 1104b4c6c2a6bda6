//! Platform secret store abstraction.

use async_trait::async_trait;

use crate::Result;
use crate::identity::Credentials;

/// Read-only access to stored internet passwords.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up credentials stored for `server`, optionally narrowed to a
    /// known username. Returns `None` when nothing usable is stored.
    async fn find_credentials(
        &self,
        server: &str,
        username: Option<&str>,
    ) -> Result<Option<Credentials>>;
}

/// Secret store for platforms without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecretStore;

#[async_trait]
impl SecretStore for NoSecretStore {
    async fn find_credentials(
        &self,
        _server: &str,
        _username: Option<&str>,
    ) -> Result<Option<Credentials>> {
        Ok(None)
    }
}
