//! Test doubles for the hosted API and the release host.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use beanstalk_config::{CredentialResolver, CredentialsCache, parse_settings};
use beanstalk_core::api::{HostedApi, HostedApiFactory};
use beanstalk_core::release::{Environment, Release, RemoteRepository};
use beanstalk_core::secret::NoSecretStore;
use beanstalk_core::{
    Credentials, EnvironmentId, GitIdentity, HostedRepository, RemoteProtocol, RepositoryId,
    RepositoryIdentity, Result, SvnIdentity,
};
use tokio::sync::Notify;

/// In-memory hosted API that records what it is asked to do.
#[derive(Default)]
pub struct MockApi {
    repositories: Vec<RemoteRepository>,
    environments: Vec<Environment>,
    listings: Mutex<usize>,
    releases: Mutex<Vec<(u64, EnvironmentId, String, String)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, id: u64, name: &str) -> Self {
        self.repositories.push(RemoteRepository {
            id: RepositoryId::new(id),
            name: name.to_string(),
        });
        self
    }

    pub fn with_environment(mut self, id: u64, name: &str, branch: Option<&str>) -> Self {
        self.environments.push(Environment {
            id: EnvironmentId::new(id),
            name: name.to_string(),
            branch_name: branch.map(String::from),
        });
        self
    }

    /// How often the repository list was fetched.
    pub fn repository_listings(&self) -> usize {
        *self.listings.lock().unwrap()
    }

    /// `(repository, environment, revision, comment)` of every release.
    pub fn releases(&self) -> Vec<(u64, EnvironmentId, String, String)> {
        self.releases.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostedApi for MockApi {
    async fn list_repositories(&self) -> Result<Vec<RemoteRepository>> {
        *self.listings.lock().unwrap() += 1;
        Ok(self.repositories.clone())
    }

    async fn list_environments(&self, _repository_id: RepositoryId) -> Result<Vec<Environment>> {
        Ok(self.environments.clone())
    }

    async fn create_release(
        &self,
        repository_id: RepositoryId,
        environment_id: EnvironmentId,
        revision: &str,
        comment: &str,
    ) -> Result<Release> {
        self.releases.lock().unwrap().push((
            repository_id.get(),
            environment_id,
            revision.to_string(),
            comment.to_string(),
        ));

        Ok(Release {
            id: Some(1),
            environment_id,
            revision: Some(revision.to_string()),
            comment: Some(comment.to_string()),
            state: Some("waiting".to_string()),
        })
    }
}

/// Hands out the same [`MockApi`] for every account.
pub struct MockConnector {
    api: Arc<MockApi>,
    connections: Mutex<Vec<(String, Credentials)>>,
}

impl MockConnector {
    pub fn new(api: Arc<MockApi>) -> Self {
        Self {
            api,
            connections: Mutex::new(Vec::new()),
        }
    }

    pub fn connections(&self) -> Vec<(String, Credentials)> {
        self.connections.lock().unwrap().clone()
    }
}

impl HostedApiFactory for MockConnector {
    fn connect(&self, account: &str, credentials: &Credentials) -> Result<Arc<dyn HostedApi>> {
        self.connections
            .lock()
            .unwrap()
            .push((account.to_string(), credentials.clone()));
        Ok(self.api.clone())
    }
}

/// Answers every prompt from a script and records what was shown.
pub struct ScriptedHost {
    choice: Option<usize>,
    note: Option<String>,
    confirm: bool,
    gate: Option<Arc<Notify>>,
    choices_offered: Mutex<usize>,
    confirmations: Mutex<Vec<String>>,
    opened: Mutex<Vec<String>>,
}

impl ScriptedHost {
    pub fn new(choice: Option<usize>, note: Option<&str>, confirm: bool) -> Self {
        Self {
            choice,
            note: note.map(String::from),
            confirm,
            gate: None,
            choices_offered: Mutex::new(0),
            confirmations: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Like [`ScriptedHost::new`], but the environment picker waits until
    /// the returned [`Notify`] fires.
    pub fn blocking(choice: Option<usize>, note: Option<&str>, confirm: bool) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut host = Self::new(choice, note, confirm);
        host.gate = Some(gate.clone());
        (host, gate)
    }

    pub fn choices_offered(&self) -> usize {
        *self.choices_offered.lock().unwrap()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl crate::host::ReleaseHost for ScriptedHost {
    async fn choose_environment(&self, _names: &[String]) -> Option<usize> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        *self.choices_offered.lock().unwrap() += 1;
        self.choice
    }

    async fn release_note(&self, _prompt: &str) -> Option<String> {
        self.note.clone()
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirmations.lock().unwrap().push(message.to_string());
        self.confirm
    }

    async fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

/// Resolver backed by a settings document and no secret store.
pub fn resolver(settings: &str) -> CredentialResolver {
    let settings = parse_settings(settings).unwrap();
    CredentialResolver::new(
        Arc::new(CredentialsCache::from_settings(&settings)),
        Arc::new(NoSecretStore),
    )
}

fn hosted() -> HostedRepository {
    HostedRepository {
        account: "acme".to_string(),
        repository_name: "site".to_string(),
        web_uri: "acme.beanstalkapp.com/site".to_string(),
        credentials: Credentials::default(),
    }
}

/// An SSH Git working copy of `acme/site` without credentials.
pub fn git_identity() -> RepositoryIdentity {
    RepositoryIdentity::Git(GitIdentity {
        hosted: hosted(),
        remote_alias: "origin".to_string(),
        remote_uri: "git@acme.beanstalkapp.com:/site.git".to_string(),
        protocol: RemoteProtocol::Ssh,
        branch: Some("main".to_string()),
        revision: "0123456789abcdef".to_string(),
        working_dir: PathBuf::from("/work/site"),
        toplevel: PathBuf::from("/work/site"),
    })
}

/// A Subversion trunk checkout of `acme/site` without credentials.
pub fn svn_identity() -> RepositoryIdentity {
    RepositoryIdentity::Svn(SvnIdentity {
        hosted: hosted(),
        uri: "acme.svn.beanstalkapp.com/site/trunk".to_string(),
        branch: "trunk".to_string(),
        revision: 41,
        working_dir: PathBuf::from("/work/site"),
    })
}
