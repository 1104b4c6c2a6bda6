//! Error types for Beanstalk tools.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not a git working copy")]
    NotAGitRepository,

    #[error("not a subversion working copy")]
    NotASvnRepository,

    #[error("no beanstalk repository found at {}", .0.display())]
    NotAHostedRepository(PathBuf),

    #[error("failed to execute `{command}` at {}: {stderr}", .dir.display())]
    VcsCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    #[error("unexpected vcs output: {0}")]
    VcsOutput(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("remote internal server error")]
    RemoteInternal,

    #[error("http client error: {0}")]
    ClientTransport(String),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no environments to list")]
    NoEnvironments,

    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("no remote head for branch '{0}'")]
    UnknownBranch(String),

    #[error("http credentials missing for account '{0}'")]
    MissingCredentials(String),

    #[error("a release is already in progress for {0}")]
    ReleaseInProgress(String),

    #[error("invalid workflow transition: {event} while {state}")]
    InvalidTransition { state: String, event: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the user can fix this by editing their credentials.
    pub fn is_credentials_problem(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::MissingCredentials(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
