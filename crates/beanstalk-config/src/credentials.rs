//! Credential resolution for hosted accounts.

use std::collections::HashMap;
use std::sync::Arc;

use beanstalk_core::hosted::account_domain;
use beanstalk_core::secret::SecretStore;
use beanstalk_core::Credentials;
use tracing::{debug, warn};

use crate::settings::Settings;

/// Account to credentials mapping loaded from settings.
///
/// Read-only after construction; later entries for the same account win.
#[derive(Debug, Clone, Default)]
pub struct CredentialsCache {
    entries: HashMap<String, Credentials>,
}

impl CredentialsCache {
    pub fn from_settings(settings: &Settings) -> Self {
        let entries = settings
            .credentials
            .iter()
            .map(|entry| (entry.account.clone(), entry.credentials.clone()))
            .collect();

        Self { entries }
    }

    pub fn get(&self, account: &str) -> Option<&Credentials> {
        self.entries.get(account)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves HTTP credentials from settings, falling back to the platform
/// secret store.
#[derive(Clone)]
pub struct CredentialResolver {
    cache: Arc<CredentialsCache>,
    store: Arc<dyn SecretStore>,
}

impl CredentialResolver {
    pub fn new(cache: Arc<CredentialsCache>, store: Arc<dyn SecretStore>) -> Self {
        Self { cache, store }
    }

    /// Credentials for `account`; both fields are empty when none are known.
    pub async fn resolve(&self, account: &str) -> Credentials {
        let configured = self.cache.get(account).cloned().unwrap_or_default();

        if configured.is_complete() {
            debug!(account = %account, "Using configured credentials");
            return configured;
        }

        let known_username = Some(configured.username.as_str()).filter(|u| !u.is_empty());
        let server = account_domain(account);

        match self.store.find_credentials(&server, known_username).await {
            Ok(Some(found)) if found.is_complete() => {
                debug!(account = %account, server = %server, "Using credentials from secret store");
                found
            }
            Ok(_) => configured,
            Err(e) => {
                warn!(account = %account, error = %e, "Secret store lookup failed");
                configured
            }
        }
    }
}
