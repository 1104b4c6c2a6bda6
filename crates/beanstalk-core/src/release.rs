//! Environments, releases and remote head state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{EnvironmentId, RepositoryId};
use crate::{Error, Result};

/// A repository as listed by the hosted service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    pub id: RepositoryId,
    pub name: String,
}

/// A deployment target of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub name: String,
    /// Branch deployed by this environment; Subversion environments may
    /// have none.
    #[serde(default)]
    pub branch_name: Option<String>,
}

/// A release record returned by the hosted service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub id: Option<u64>,
    pub environment_id: EnvironmentId,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// What the user asked to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub environment_id: EnvironmentId,
    pub revision: String,
    pub message: String,
}

/// Latest state of the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteHeads {
    /// Branch name to commit hash, from `git ls-remote -h`.
    Git(BTreeMap<String, String>),
    /// Head revision of the checkout URL, from `svn info <url>`.
    Svn(u64),
}

impl RemoteHeads {
    /// Revision that a release to `environment` should deploy.
    pub fn revision_for(&self, environment: &Environment) -> Result<String> {
        match self {
            RemoteHeads::Git(heads) => {
                let branch = environment.branch_name.as_deref().unwrap_or_default();
                heads
                    .get(branch)
                    .cloned()
                    .ok_or_else(|| Error::UnknownBranch(branch.to_string()))
            }
            RemoteHeads::Svn(revision) => Ok(revision.to_string()),
        }
    }
}
