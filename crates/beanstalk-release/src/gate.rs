//! Credential gating before authenticated calls.

use beanstalk_config::CredentialResolver;
use beanstalk_core::{Error, RepositoryIdentity, Result};
use tracing::debug;

/// Make sure `identity` carries usable HTTP credentials.
///
/// Credentials embedded in the working copy are kept as they are. Otherwise
/// the resolver is consulted; if it has nothing complete either, fails with
/// [`Error::MissingCredentials`] and no call should be attempted.
pub async fn ensure_credentials(
    identity: &mut RepositoryIdentity,
    resolver: &CredentialResolver,
) -> Result<()> {
    if identity.credentials().is_complete() {
        return Ok(());
    }

    debug!(account = %identity.account(), "Working copy carries no credentials");

    let resolved = resolver.resolve(identity.account()).await;
    if !resolved.is_complete() {
        return Err(Error::MissingCredentials(identity.account().to_string()));
    }

    identity.set_credentials(resolved);
    Ok(())
}
