//! Web links into the hosted service.
//!
//! `web_uri` is always the canonical `host/path` form of a repository,
//! e.g. `acme.beanstalkapp.com/website`.

use crate::id::EnvironmentId;

/// Branch assumed when the working copy has none checked out.
pub const DEFAULT_BRANCH: &str = "master";

/// Repository activity page.
pub fn activity_url(web_uri: &str) -> String {
    format!("https://{}", web_uri)
}

/// List of the repository's server environments.
pub fn deployments_url(web_uri: &str) -> String {
    format!("https://{}/environments", web_uri)
}

/// Page of one environment, showing its releases.
pub fn release_environment_url(web_uri: &str, environment_id: EnvironmentId) -> String {
    format!("https://{}/environments/{}", web_uri, environment_id)
}

/// Source view of a file on `branch`.
pub fn git_browse_file_url(web_uri: &str, file_path: &str, branch: &str) -> String {
    format!(
        "https://{}/browse/git/{}?branch={}",
        web_uri, file_path, branch
    )
}

/// Blame view of a file at `revision`.
pub fn git_blame_file_url(web_uri: &str, file_path: &str, revision: &str, branch: &str) -> String {
    format!(
        "https://{}/blame/{}?branch={}&rev={}",
        web_uri, file_path, branch, revision
    )
}

/// Rendered preview of a file at `revision`.
pub fn git_preview_file_url(
    web_uri: &str,
    file_path: &str,
    revision: &str,
    branch: &str,
) -> String {
    format!(
        "https://{}/previews/{}?back_to=file&branch={}&rev={}",
        web_uri, file_path, branch, revision
    )
}

/// Source view of a file. `branch` is the path below the repository root.
pub fn svn_browse_file_url(web_uri: &str, file_path: &str, branch: &str) -> String {
    format!("https://{}/browse/{}/{}", web_uri, branch, file_path)
}

/// Blame view of a file at `revision`.
pub fn svn_blame_file_url(web_uri: &str, file_path: &str, revision: u64, branch: &str) -> String {
    format!(
        "https://{}/blame/{}/{}?rev={}",
        web_uri, branch, file_path, revision
    )
}

/// Rendered preview of a file at `revision`.
pub fn svn_preview_file_url(
    web_uri: &str,
    file_path: &str,
    revision: u64,
    branch: &str,
) -> String {
    format!(
        "https://{}/previews/{}/{}?back_to=file&rev={}",
        web_uri, branch, file_path, revision
    )
}
