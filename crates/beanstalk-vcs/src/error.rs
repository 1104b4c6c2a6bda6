//! VCS introspection errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("not a git working copy")]
    NotAGitRepository,

    #[error("not a subversion working copy")]
    NotASvnRepository,

    #[error("no beanstalk repository found at {}", .0.display())]
    NotAHostedRepository(PathBuf),

    #[error("Failed to execute `{command}` at {}: {stderr}", .dir.display())]
    CommandFailed {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected output: {0}")]
    UnexpectedOutput(String),
}

pub type VcsResult<T> = std::result::Result<T, VcsError>;

impl From<VcsError> for beanstalk_core::Error {
    fn from(err: VcsError) -> Self {
        match err {
            VcsError::NotAGitRepository => beanstalk_core::Error::NotAGitRepository,
            VcsError::NotASvnRepository => beanstalk_core::Error::NotASvnRepository,
            VcsError::NotAHostedRepository(path) => {
                beanstalk_core::Error::NotAHostedRepository(path)
            }
            VcsError::CommandFailed {
                command,
                dir,
                stderr,
            } => beanstalk_core::Error::VcsCommand {
                command,
                dir,
                stderr,
            },
            VcsError::Spawn { command, source } => beanstalk_core::Error::VcsCommand {
                command,
                dir: PathBuf::new(),
                stderr: source.to_string(),
            },
            VcsError::UnexpectedOutput(message) => beanstalk_core::Error::VcsOutput(message),
        }
    }
}
