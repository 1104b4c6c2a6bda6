//! Beanstalk REST API client.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use beanstalk_core::api::{HostedApi, HostedApiFactory};
use beanstalk_core::hosted::account_domain;
use beanstalk_core::release::{Environment, Release, RemoteRepository};
use beanstalk_core::{Credentials, EnvironmentId, RepositoryId};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ApiError, ApiResult};

const USER_AGENT: &str = concat!("beanstalk-tools/", env!("CARGO_PKG_VERSION"));

/// API client for one account.
#[derive(Clone)]
pub struct BeanstalkClient {
    client: reqwest::Client,
    base_url: Url,
    authorization: String,
}

impl BeanstalkClient {
    /// Client for `https://<account>.beanstalkapp.com`.
    ///
    /// Empty credentials are accepted; every call then fails with
    /// [`ApiError::Unauthorized`].
    pub fn new(account: &str, username: &str, password: &str) -> ApiResult<Self> {
        let base_url = Url::parse(&format!("https://{}", account_domain(account)))?;
        Ok(Self::with_base_url(base_url, username, password))
    }

    /// Client against an arbitrary base URL.
    pub fn with_base_url(base_url: Url, username: &str, password: &str) -> Self {
        let token = STANDARD.encode(format!("{}:{}", username, password));
        Self {
            client: reqwest::Client::new(),
            base_url,
            authorization: format!("Basic {}", token),
        }
    }

    /// Replace the underlying HTTP client, e.g. to change proxy or TLS
    /// settings.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Value of the `Authorization` header sent with every request.
    pub fn authorization_header(&self) -> &str {
        &self.authorization
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path)?;
        debug!(url = %url, "GET");

        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        parse_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> ApiResult<T> {
        debug!(url = %url, "POST");

        let response = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        parse_response(response).await
    }

    /// List every repository of the account.
    pub async fn repositories(&self) -> ApiResult<Vec<RemoteRepository>> {
        let envelopes: Vec<RepositoryEnvelope> = self.get("/api/repositories.json").await?;
        Ok(envelopes.into_iter().map(|e| e.repository).collect())
    }

    /// List the server environments of a repository.
    pub async fn environments(&self, repository_id: RepositoryId) -> ApiResult<Vec<Environment>> {
        let path = format!("/api/{}/server_environments.json", repository_id);
        let envelopes: Vec<EnvironmentEnvelope> = self.get(&path).await?;
        Ok(envelopes.into_iter().map(|e| e.server_environment).collect())
    }

    /// Create a release of `revision` to an environment.
    pub async fn release(
        &self,
        repository_id: RepositoryId,
        environment_id: EnvironmentId,
        revision: &str,
        comment: &str,
    ) -> ApiResult<Release> {
        let mut url = self.url(&format!("/api/{}/releases.json", repository_id))?;
        url.query_pairs_mut()
            .append_pair("environment_id", &environment_id.to_string());

        let body = ReleaseEnvelope {
            release: NewRelease { comment, revision },
        };

        let envelope: CreatedRelease = self.post(url, &body).await?;
        info!(
            repository_id = %repository_id,
            environment_id = %envelope.release.environment_id,
            revision = %revision,
            "Created release"
        );
        Ok(envelope.release)
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();

    match status {
        StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
        StatusCode::INTERNAL_SERVER_ERROR => return Err(ApiError::InternalServerError),
        _ => {}
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[derive(Deserialize)]
struct RepositoryEnvelope {
    repository: RemoteRepository,
}

#[derive(Deserialize)]
struct EnvironmentEnvelope {
    server_environment: Environment,
}

#[derive(Serialize)]
struct ReleaseEnvelope<'a> {
    release: NewRelease<'a>,
}

#[derive(Serialize)]
struct NewRelease<'a> {
    comment: &'a str,
    revision: &'a str,
}

#[derive(Deserialize)]
struct CreatedRelease {
    release: Release,
}

#[async_trait]
impl HostedApi for BeanstalkClient {
    async fn list_repositories(&self) -> beanstalk_core::Result<Vec<RemoteRepository>> {
        Ok(self.repositories().await?)
    }

    async fn list_environments(
        &self,
        repository_id: RepositoryId,
    ) -> beanstalk_core::Result<Vec<Environment>> {
        Ok(self.environments(repository_id).await?)
    }

    async fn create_release(
        &self,
        repository_id: RepositoryId,
        environment_id: EnvironmentId,
        revision: &str,
        comment: &str,
    ) -> beanstalk_core::Result<Release> {
        Ok(self
            .release(repository_id, environment_id, revision, comment)
            .await?)
    }
}

/// Connects [`BeanstalkClient`]s to the production service.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeanstalkConnector;

impl HostedApiFactory for BeanstalkConnector {
    fn connect(
        &self,
        account: &str,
        credentials: &Credentials,
    ) -> beanstalk_core::Result<Arc<dyn HostedApi>> {
        let client = BeanstalkClient::new(account, &credentials.username, &credentials.password)?;
        Ok(Arc::new(client))
    }
}
