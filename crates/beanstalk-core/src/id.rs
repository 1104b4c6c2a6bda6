//! Numeric identifiers assigned by the hosted service.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identifier of a repository on the hosted service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct RepositoryId(u64);

impl RepositoryId {
    /// Wrap an id returned by the API.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Identifier of a server environment (deployment target).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct EnvironmentId(u64);

impl EnvironmentId {
    /// Wrap an id returned by the API.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::str::FromStr for EnvironmentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
