//! Core domain types and traits for Beanstalk tools.
//!
//! This crate contains:
//! - Repository identity for Git and Subversion working copies
//! - Environment and release types
//! - Web link builders
//! - Seams to the hosted API and the platform secret store

pub mod api;
pub mod error;
pub mod hosted;
pub mod id;
pub mod identity;
pub mod release;
pub mod secret;
pub mod urls;

pub use error::{Error, Result};
pub use id::{EnvironmentId, RepositoryId};
pub use identity::{
    Credentials, GitIdentity, HostedRepository, RemoteProtocol, RepositoryIdentity, Revision,
    SvnIdentity, VcsKind,
};
