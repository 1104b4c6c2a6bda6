//! Turning failures into dialog text.

use std::path::Path;

use beanstalk_core::Error;

/// Follow-up offered together with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// Copy the default settings into place and open them.
    OpenSettings,
}

/// What the user is shown for a failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub text: String,
    pub remediation: Option<Remediation>,
}

impl UserMessage {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            remediation: None,
        }
    }

    fn with_settings(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            remediation: Some(Remediation::OpenSettings),
        }
    }
}

pub const NO_FILE_MESSAGE: &str = "Please open a file first.";

/// Dialog text for `err`. `rootdir` is where detection started.
pub fn user_message(err: &Error, rootdir: &Path) -> UserMessage {
    match err {
        Error::NotAGitRepository | Error::NotASvnRepository | Error::NotAHostedRepository(_) => {
            UserMessage::plain(format!(
                "Beanstalk Subversion or Git repository not found at {}.",
                rootdir.display()
            ))
        }
        Error::Unauthorized => UserMessage::with_settings("Invalid Beanstalk API credentials."),
        Error::MissingCredentials(_) => {
            UserMessage::with_settings("HTTP credentials are required to perform this action.")
        }
        Error::RemoteInternal => UserMessage::plain(
            "Oops! Beanstalk API responded with 500 Internal Server Error. \
             Please make sure the API is enabled on your Beanstalk account.",
        ),
        Error::ClientTransport(message) => UserMessage::plain(format!(
            "Oops! It seems like you encountered HTTP client error. {}",
            message
        )),
        Error::NoEnvironments => UserMessage::plain("There are no environments to list."),
        Error::RepositoryNotFound(name) => {
            UserMessage::plain(format!("Repository {} was not found on Beanstalk.", name))
        }
        Error::UnknownBranch(branch) => UserMessage::plain(format!(
            "Branch {} of the selected environment does not exist on the remote repository.",
            branch
        )),
        Error::ReleaseInProgress(_) => {
            UserMessage::plain("A release of this repository is already in progress.")
        }
        Error::Config(message) => {
            UserMessage::with_settings(format!("Invalid Beanstalk settings: {}", message))
        }
        other => UserMessage::plain(other.to_string()),
    }
}
