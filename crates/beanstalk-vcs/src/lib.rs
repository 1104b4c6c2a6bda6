//! Working copy introspection for Beanstalk-hosted repositories.
//!
//! This crate handles:
//! - Running `git` and `svn` in a working copy
//! - Extracting the hosted repository identity from their output
//! - Querying the current state of the hosted remote

pub mod command;
pub mod detector;
pub mod error;
pub mod git;
pub mod remote;
pub mod svn;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub use detector::RepositoryDetector;
pub use error::{VcsError, VcsResult};
pub use git::Git;
pub use svn::Svn;
