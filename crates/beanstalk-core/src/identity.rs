//! Repository identity extracted from a working copy.
//!
//! An identity is built once per command invocation by the VCS extractor and
//! only ever mutated to fill in HTTP credentials before the first
//! authenticated call.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hosted::{GIT_DOMAIN, HOSTED_DOMAIN};
use crate::id::EnvironmentId;
use crate::urls::{self, DEFAULT_BRANCH};

/// Which version control system a working copy uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Svn,
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsKind::Git => write!(f, "git"),
            VcsKind::Svn => write!(f, "svn"),
        }
    }
}

/// How a Git remote was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteProtocol {
    Ssh,
    Http,
}

impl fmt::Display for RemoteProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteProtocol::Ssh => write!(f, "ssh"),
            RemoteProtocol::Http => write!(f, "http"),
        }
    }
}

/// HTTP credentials. Both fields are empty strings when unknown.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Credentials from a username and a password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both username and password are present.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

/// Fields every hosted repository carries regardless of VCS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedRepository {
    /// Account slug, e.g. `acme` for `acme.beanstalkapp.com`.
    pub account: String,
    /// Last path segment of the web URI.
    pub repository_name: String,
    /// Canonical `host/path` form used to build every web link.
    pub web_uri: String,
    pub credentials: Credentials,
}

/// A Git working copy whose remote points at the hosted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub hosted: HostedRepository,
    pub remote_alias: String,
    /// The remote as declared, without scheme or embedded credentials for
    /// HTTPS remotes.
    pub remote_uri: String,
    pub protocol: RemoteProtocol,
    /// Checked-out branch; `None` when `git branch` marks none as current.
    pub branch: Option<String>,
    /// Full commit hash of `HEAD`.
    pub revision: String,
    /// Directory the command was invoked from.
    pub working_dir: PathBuf,
    /// Output of `git rev-parse --show-toplevel`.
    pub toplevel: PathBuf,
}

impl GitIdentity {
    /// Host and path used for HTTPS access, without scheme or credentials.
    pub fn http_uri(&self) -> String {
        match self.protocol {
            RemoteProtocol::Http => self.remote_uri.clone(),
            RemoteProtocol::Ssh => format!(
                "{}.git",
                self.hosted.web_uri.replace(HOSTED_DOMAIN, GIT_DOMAIN)
            ),
        }
    }

    /// Path of `file` (relative to the working directory) from the
    /// repository root.
    pub fn repository_path(&self, file: &Path) -> String {
        if self.working_dir == self.toplevel {
            return to_url_path(file);
        }

        match self.working_dir.strip_prefix(&self.toplevel) {
            Ok(subdir) => to_url_path(&subdir.join(file)),
            Err(_) => to_url_path(file),
        }
    }

    fn branch_or_default(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }
}

/// A Subversion working copy checked out from the hosted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvnIdentity {
    pub hosted: HostedRepository,
    /// Checkout URL without scheme or embedded credentials.
    pub uri: String,
    /// Path of the checkout below the repository root, e.g. `trunk`.
    pub branch: String,
    pub revision: u64,
    pub working_dir: PathBuf,
}

/// Identifier of the checked-out state of a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Commit(String),
    Number(u64),
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Commit(hash) => write!(f, "{}", hash),
            Revision::Number(number) => write!(f, "{}", number),
        }
    }
}

/// A working copy identified as a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryIdentity {
    Git(GitIdentity),
    Svn(SvnIdentity),
}

impl RepositoryIdentity {
    /// Version control system of the working copy.
    pub fn kind(&self) -> VcsKind {
        match self {
            RepositoryIdentity::Git(_) => VcsKind::Git,
            RepositoryIdentity::Svn(_) => VcsKind::Svn,
        }
    }

    /// Fields shared by both VCS kinds.
    pub fn hosted(&self) -> &HostedRepository {
        match self {
            RepositoryIdentity::Git(git) => &git.hosted,
            RepositoryIdentity::Svn(svn) => &svn.hosted,
        }
    }

    /// Account slug on the hosted service.
    pub fn account(&self) -> &str {
        &self.hosted().account
    }

    /// Repository name as listed by the API.
    pub fn name(&self) -> &str {
        &self.hosted().repository_name
    }

    /// Canonical `host/path` of the repository.
    pub fn web_uri(&self) -> &str {
        &self.hosted().web_uri
    }

    /// HTTP credentials, possibly empty.
    pub fn credentials(&self) -> &Credentials {
        &self.hosted().credentials
    }

    /// Fill in credentials resolved outside the working copy.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        match self {
            RepositoryIdentity::Git(git) => git.hosted.credentials = credentials,
            RepositoryIdentity::Svn(svn) => svn.hosted.credentials = credentials,
        }
    }

    /// Checked-out branch. Always present for Subversion.
    pub fn branch(&self) -> Option<&str> {
        match self {
            RepositoryIdentity::Git(git) => git.branch.as_deref(),
            RepositoryIdentity::Svn(svn) => Some(&svn.branch),
        }
    }

    /// Checked-out commit or revision number.
    pub fn revision(&self) -> Revision {
        match self {
            RepositoryIdentity::Git(git) => Revision::Commit(git.revision.clone()),
            RepositoryIdentity::Svn(svn) => Revision::Number(svn.revision),
        }
    }

    /// Directory detection started from.
    pub fn working_dir(&self) -> &Path {
        match self {
            RepositoryIdentity::Git(git) => &git.working_dir,
            RepositoryIdentity::Svn(svn) => &svn.working_dir,
        }
    }

    /// Source view of `file` (relative to the working directory).
    pub fn browse_file_url(&self, file: &Path) -> String {
        match self {
            RepositoryIdentity::Git(git) => urls::git_browse_file_url(
                &git.hosted.web_uri,
                &git.repository_path(file),
                git.branch_or_default(),
            ),
            RepositoryIdentity::Svn(svn) => {
                urls::svn_browse_file_url(&svn.hosted.web_uri, &to_url_path(file), &svn.branch)
            }
        }
    }

    /// Blame view of `file` at the checked-out revision.
    pub fn blame_file_url(&self, file: &Path) -> String {
        match self {
            RepositoryIdentity::Git(git) => urls::git_blame_file_url(
                &git.hosted.web_uri,
                &git.repository_path(file),
                &git.revision,
                git.branch_or_default(),
            ),
            RepositoryIdentity::Svn(svn) => urls::svn_blame_file_url(
                &svn.hosted.web_uri,
                &to_url_path(file),
                svn.revision,
                &svn.branch,
            ),
        }
    }

    /// Rendered preview of `file` at the checked-out revision.
    pub fn preview_file_url(&self, file: &Path) -> String {
        match self {
            RepositoryIdentity::Git(git) => urls::git_preview_file_url(
                &git.hosted.web_uri,
                &git.repository_path(file),
                &git.revision,
                git.branch_or_default(),
            ),
            RepositoryIdentity::Svn(svn) => urls::svn_preview_file_url(
                &svn.hosted.web_uri,
                &to_url_path(file),
                svn.revision,
                &svn.branch,
            ),
        }
    }

    /// Activity page of the repository.
    pub fn activity_url(&self) -> String {
        urls::activity_url(self.web_uri())
    }

    /// Environments page of the repository.
    pub fn deployments_url(&self) -> String {
        urls::deployments_url(self.web_uri())
    }

    /// Page of an environment, opened after a release.
    pub fn release_environment_url(&self, environment_id: EnvironmentId) -> String {
        urls::release_environment_url(self.web_uri(), environment_id)
    }
}

/// Join path components with `/` and drop leading separators.
pub fn to_url_path(path: &Path) -> String {
    let joined = path
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    joined.trim_start_matches(['/', '\\']).to_string()
}
