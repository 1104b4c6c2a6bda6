//! Git working copy introspection.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use beanstalk_core::hosted::{account_domain, account_label, is_git_host, is_hosted_host, web_host};
use beanstalk_core::{Credentials, GitIdentity, HostedRepository, RemoteProtocol};
use tracing::debug;

use crate::command::{CommandRunner, run_checked};
use crate::error::{VcsError, VcsResult};
use crate::remote::{account_and_name, authenticated_url, split_userinfo};

const GIT: &str = "git";

/// A remote that points at the hosted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemote {
    pub alias: String,
    pub protocol: RemoteProtocol,
    pub remote_uri: String,
    pub hosted: HostedRepository,
}

/// Reads repository identity and remote heads through the `git` executable.
#[derive(Clone)]
pub struct Git {
    runner: Arc<dyn CommandRunner>,
}

impl Git {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn git(&self, dir: &Path, args: &[&str]) -> VcsResult<String> {
        run_checked(self.runner.as_ref(), GIT, args, dir).await
    }

    /// Whether `dir` is inside a Git working copy.
    pub async fn is_working_copy(&self, dir: &Path) -> VcsResult<bool> {
        let output = self.runner.run(GIT, &["rev-parse"], dir).await?;
        Ok(output.success)
    }

    /// Build the identity of the working copy at `dir`.
    pub async fn identify(&self, dir: &Path) -> VcsResult<GitIdentity> {
        if !self.is_working_copy(dir).await? {
            return Err(VcsError::NotAGitRepository);
        }

        let remotes = parse_remotes(&self.git(dir, &["remote", "-v"]).await?);
        let remote = choose_remote(&remotes)
            .ok_or_else(|| VcsError::NotAHostedRepository(dir.to_path_buf()))?;

        let branch = parse_branch(&self.git(dir, &["branch"]).await?);
        let revision = self.git(dir, &["rev-parse", "HEAD"]).await?;
        let toplevel = PathBuf::from(self.git(dir, &["rev-parse", "--show-toplevel"]).await?);

        let identity = GitIdentity {
            hosted: remote.hosted,
            remote_alias: remote.alias,
            remote_uri: remote.remote_uri,
            protocol: remote.protocol,
            branch,
            revision,
            working_dir: dir.to_path_buf(),
            toplevel,
        };

        debug!(
            account = %identity.hosted.account,
            repository = %identity.hosted.repository_name,
            web_uri = %identity.hosted.web_uri,
            protocol = %identity.protocol,
            branch = ?identity.branch,
            "Parsed git repository"
        );

        Ok(identity)
    }

    /// Map of branch name to head commit on the hosted remote.
    pub async fn remote_heads(&self, identity: &GitIdentity) -> VcsResult<BTreeMap<String, String>> {
        let url = authenticated_url(&identity.hosted.credentials, &identity.http_uri());
        let output = self
            .git(&identity.working_dir, &["ls-remote", "-h", &url])
            .await?;
        Ok(parse_heads(&output))
    }
}

/// Parse `git remote -v` output into `(alias, url)` pairs, in declaration
/// order.
pub fn parse_remotes(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let alias = fields.next()?;
            let url = fields.next()?;
            Some((alias.to_string(), url.to_string()))
        })
        .collect()
}

/// The first remote, in declaration order, that points at the hosted
/// service.
pub fn choose_remote(remotes: &[(String, String)]) -> Option<GitRemote> {
    remotes
        .iter()
        .find_map(|(alias, url)| parse_remote(alias, url))
}

/// Classify a remote URL; `None` when it does not point at the hosted
/// service.
pub fn parse_remote(alias: &str, url: &str) -> Option<GitRemote> {
    if let Some(rest) = url.strip_prefix("git@") {
        let host = rest.split(':').next()?;
        if is_hosted_host(host) {
            return parse_ssh_remote(alias, url, rest);
        }
    } else if let Some(rest) = url.strip_prefix("https://") {
        let (credentials, location) = split_userinfo(rest);
        let host = location.split('/').next()?;
        if is_git_host(host) {
            return parse_https_remote(alias, credentials, location);
        }
    }

    None
}

fn parse_ssh_remote(alias: &str, url: &str, rest: &str) -> Option<GitRemote> {
    let (host, path) = rest.split_once(':')?;
    let path = path.strip_suffix(".git").unwrap_or(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let name = *segments.last()?;

    // `git@host:acct/repo.git` names the account in the path
    let (account, web_uri) = if segments.len() > 1 {
        let account = segments[0];
        (account.to_string(), format!("{}/{}", account_domain(account), name))
    } else {
        let web_host = web_host(host);
        let account = account_label(&web_host)?.to_string();
        let web_uri = format!("{}/{}", web_host, name);
        (account, web_uri)
    };

    Some(GitRemote {
        alias: alias.to_string(),
        protocol: RemoteProtocol::Ssh,
        remote_uri: url.to_string(),
        hosted: HostedRepository {
            account,
            repository_name: name.to_string(),
            web_uri,
            credentials: Credentials::default(),
        },
    })
}

fn parse_https_remote(alias: &str, credentials: Credentials, location: &str) -> Option<GitRemote> {
    let uri = location.strip_suffix(".git").unwrap_or(location);
    let (host, path) = uri.split_once('/')?;
    let web_uri = format!("{}/{}", web_host(host), path.trim_matches('/'));
    let (account, repository_name) = account_and_name(&web_uri)?;

    Some(GitRemote {
        alias: alias.to_string(),
        protocol: RemoteProtocol::Http,
        remote_uri: location.to_string(),
        hosted: HostedRepository {
            account,
            repository_name,
            web_uri,
            credentials,
        },
    })
}

/// Current branch from `git branch` output; `None` when detached or when
/// no line is marked.
pub fn parse_branch(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("* "))
        .map(str::trim)
        .filter(|branch| !branch.is_empty() && !branch.starts_with('('))
        .map(String::from)
}

/// Parse `git ls-remote -h` output into a branch to commit map.
pub fn parse_heads(output: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let hash = fields.next()?;
            let reference = fields.next()?;
            let branch = reference.strip_prefix("refs/heads/").unwrap_or(reference);
            Some((branch.to_string(), hash.to_string()))
        })
        .collect()
}
