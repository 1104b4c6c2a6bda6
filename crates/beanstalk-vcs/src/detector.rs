//! Repository detection across supported VCS kinds.

use std::path::Path;
use std::sync::Arc;

use beanstalk_core::release::RemoteHeads;
use beanstalk_core::RepositoryIdentity;
use tracing::{debug, info};

use crate::command::{CommandRunner, SystemRunner};
use crate::error::{VcsError, VcsResult};
use crate::git::Git;
use crate::svn::Svn;

/// Identifies the hosted repository behind a working copy.
///
/// Git is tried first, then Subversion. Any failure while extracting one
/// kind moves on to the next; only when both fail does detection report
/// [`VcsError::NotAHostedRepository`].
#[derive(Clone)]
pub struct RepositoryDetector {
    git: Git,
    svn: Svn,
}

impl RepositoryDetector {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            git: Git::new(runner.clone()),
            svn: Svn::new(runner),
        }
    }

    /// Detector that runs the real `git` and `svn` executables.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemRunner))
    }

    pub async fn detect(&self, path: &Path) -> VcsResult<RepositoryIdentity> {
        match self.git.identify(path).await {
            Ok(git) => {
                info!(path = %path.display(), web_uri = %git.hosted.web_uri, "Detected git repository");
                return Ok(RepositoryIdentity::Git(git));
            }
            Err(e) => debug!(path = %path.display(), error = %e, "Git detection failed"),
        }

        match self.svn.identify(path).await {
            Ok(svn) => {
                info!(path = %path.display(), web_uri = %svn.hosted.web_uri, "Detected svn repository");
                return Ok(RepositoryIdentity::Svn(svn));
            }
            Err(e) => debug!(path = %path.display(), error = %e, "Subversion detection failed"),
        }

        Err(VcsError::NotAHostedRepository(path.to_path_buf()))
    }

    /// Current state of the hosted remote: branch heads for Git, the latest
    /// revision for Subversion.
    pub async fn remote_heads(&self, identity: &RepositoryIdentity) -> VcsResult<RemoteHeads> {
        match identity {
            RepositoryIdentity::Git(git) => Ok(RemoteHeads::Git(self.git.remote_heads(git).await?)),
            RepositoryIdentity::Svn(svn) => Ok(RemoteHeads::Svn(self.svn.remote_revision(svn).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;
    use beanstalk_core::{RemoteProtocol, VcsKind};

    fn scenario_a() -> ScriptedRunner {
        ScriptedRunner::new()
            .on("git rev-parse", "")
            .on(
                "git remote -v",
                "origin\tgit@git.example.beanstalkapp.com:acct/myrepo.git (fetch)\n\
                 origin\tgit@git.example.beanstalkapp.com:acct/myrepo.git (push)",
            )
            .on("git branch", "* master")
            .on("git rev-parse HEAD", "0123456789abcdef0123456789abcdef01234567")
            .on("git rev-parse --show-toplevel", "/repo")
    }

    #[tokio::test]
    async fn test_detect_git_over_ssh() {
        let detector = RepositoryDetector::new(Arc::new(scenario_a()));
        let identity = detector.detect(Path::new("/repo")).await.unwrap();

        let RepositoryIdentity::Git(git) = &identity else {
            panic!("expected a git identity");
        };
        assert_eq!(git.protocol, RemoteProtocol::Ssh);
        assert_eq!(identity.account(), "acct");
        assert_eq!(identity.name(), "myrepo");
        assert_eq!(identity.web_uri(), "acct.beanstalkapp.com/myrepo");
        assert_eq!(identity.credentials().username, "");
        assert_eq!(identity.credentials().password, "");
    }

    #[tokio::test]
    async fn test_detect_is_idempotent() {
        let detector = RepositoryDetector::new(Arc::new(scenario_a()));
        let first = detector.detect(Path::new("/repo")).await.unwrap();
        let second = detector.detect(Path::new("/repo")).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_falls_back_to_svn() {
        let runner = ScriptedRunner::new().on(
            "svn info",
            "URL: https://acme.svn.beanstalkapp.com/site/trunk\n\
             Repository Root: https://acme.svn.beanstalkapp.com/site\n\
             Revision: 7\n",
        );
        let detector = RepositoryDetector::new(Arc::new(runner));
        let identity = detector.detect(Path::new("/work/site")).await.unwrap();

        assert_eq!(identity.kind(), VcsKind::Svn);
        assert_eq!(identity.branch(), Some("trunk"));
    }

    #[tokio::test]
    async fn test_git_without_hosted_remote_falls_back_to_svn() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .on("git rev-parse", "")
                .on("git remote -v", "origin\tgit@github.com:acme/site.git (fetch)")
                .on_failure("svn info", "svn: E155007: not a working copy"),
        );
        let detector = RepositoryDetector::new(runner.clone());

        let err = detector.detect(Path::new("/work/site")).await.unwrap_err();
        assert!(matches!(err, VcsError::NotAHostedRepository(_)));
        assert!(runner.calls().contains(&"svn info".to_string()));
    }

    #[tokio::test]
    async fn test_foreign_svn_is_not_hosted() {
        let runner = ScriptedRunner::new().on(
            "svn info",
            "URL: https://svn.example.org/site/trunk\n\
             Repository Root: https://svn.example.org/site\n\
             Revision: 7\n",
        );
        let detector = RepositoryDetector::new(Arc::new(runner));
        let err = detector.detect(Path::new("/work/site")).await.unwrap_err();
        assert!(matches!(err, VcsError::NotAHostedRepository(_)));
    }

    #[tokio::test]
    async fn test_remote_heads_for_git() {
        let runner = scenario_a().on(
            "git ls-remote -h https://:@acct.git.beanstalkapp.com/myrepo.git",
            "deadbeef\trefs/heads/master\ncafebabe\trefs/heads/develop",
        );
        let detector = RepositoryDetector::new(Arc::new(runner));
        let identity = detector.detect(Path::new("/repo")).await.unwrap();

        let RemoteHeads::Git(heads) = detector.remote_heads(&identity).await.unwrap() else {
            panic!("expected git heads");
        };
        assert_eq!(heads.len(), 2);
        assert_eq!(heads.get("develop").map(String::as_str), Some("cafebabe"));
    }
}
