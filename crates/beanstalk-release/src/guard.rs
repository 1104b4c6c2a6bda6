//! At most one in-flight release per repository.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use beanstalk_core::{Error, Result};
use tracing::debug;

/// Tracks repositories with a release in progress, keyed by web URI.
#[derive(Debug, Clone, Default)]
pub struct ReleaseGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl ReleaseGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim `key` until the returned ticket is dropped.
    pub fn acquire(&self, key: &str) -> Result<ReleaseTicket> {
        if !self.lock().insert(key.to_string()) {
            return Err(Error::ReleaseInProgress(key.to_string()));
        }

        debug!(repository = %key, "Release slot acquired");
        Ok(ReleaseTicket {
            guard: self.clone(),
            key: key.to_string(),
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.lock().contains(key)
    }
}

/// Held for the lifetime of one release run.
#[derive(Debug)]
pub struct ReleaseTicket {
    guard: ReleaseGuard,
    key: String,
}

impl Drop for ReleaseTicket {
    fn drop(&mut self) {
        self.guard.lock().remove(&self.key);
        debug!(repository = %self.key, "Release slot released");
    }
}
