//! Drives a release from environment selection to the created release.

use std::sync::Arc;

use beanstalk_config::CredentialResolver;
use beanstalk_core::api::HostedApiFactory;
use beanstalk_core::release::Release;
use beanstalk_core::{Error, RepositoryIdentity, Result};
use beanstalk_vcs::RepositoryDetector;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::gate::ensure_credentials;
use crate::guard::{ReleaseGuard, ReleaseTicket};
use crate::host::{RELEASE_NOTE_PROMPT, ReleaseHost, confirmation_message};
use crate::session::RepositorySession;
use crate::state::{ReleaseMachine, WorkflowEvent, WorkflowState};

/// Progress message while environments and remote heads are fetched.
pub const PREPARING_MESSAGE: &str = "Preparing for a Beanstalk release";

/// Event emitted while a workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseEvent {
    StateChanged { state: WorkflowState },
    /// Human readable progress for a status bar.
    Progress { message: String },
}

/// Final result of a workflow run.
#[derive(Debug)]
pub struct WorkflowResult {
    /// `Done`, `Idle` after a cancellation, or `Errored`.
    pub state: WorkflowState,
    pub release: Option<Release>,
    /// Environment page opened after a successful release.
    pub environment_url: Option<String>,
    pub error: Option<Error>,
}

impl WorkflowResult {
    pub fn is_success(&self) -> bool {
        self.state == WorkflowState::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == WorkflowState::Idle
    }
}

/// Runs release workflows.
#[derive(Clone)]
pub struct ReleaseWorkflow {
    detector: RepositoryDetector,
    connector: Arc<dyn HostedApiFactory>,
    resolver: CredentialResolver,
    guard: ReleaseGuard,
}

impl ReleaseWorkflow {
    pub fn new(
        detector: RepositoryDetector,
        connector: Arc<dyn HostedApiFactory>,
        resolver: CredentialResolver,
        guard: ReleaseGuard,
    ) -> Self {
        Self {
            detector,
            connector,
            resolver,
            guard,
        }
    }

    /// Start a release of `identity` in a background task, returning a
    /// channel of events and a handle to the final result.
    ///
    /// Fails with [`Error::ReleaseInProgress`] when another release of the
    /// same repository has not finished yet.
    pub fn execute(
        &self,
        identity: RepositoryIdentity,
        host: Arc<dyn ReleaseHost>,
    ) -> Result<(
        mpsc::Receiver<ReleaseEvent>,
        tokio::task::JoinHandle<WorkflowResult>,
    )> {
        let ticket = self.guard.acquire(identity.web_uri())?;
        let (tx, rx) = mpsc::channel(32);
        let workflow = self.clone();

        let handle = tokio::spawn(async move {
            workflow.execute_inner(identity, host, ticket, tx).await
        });

        Ok((rx, handle))
    }

    async fn execute_inner(
        self,
        identity: RepositoryIdentity,
        host: Arc<dyn ReleaseHost>,
        _ticket: ReleaseTicket,
        tx: mpsc::Sender<ReleaseEvent>,
    ) -> WorkflowResult {
        let mut run = Run {
            machine: ReleaseMachine::new(),
            tx,
        };

        match self.run(&mut run, identity, host.as_ref()).await {
            Ok(Some((release, url))) => WorkflowResult {
                state: run.machine.state().clone(),
                release: Some(release),
                environment_url: Some(url),
                error: None,
            },
            Ok(None) => {
                info!("Release cancelled");
                WorkflowResult {
                    state: run.machine.state().clone(),
                    release: None,
                    environment_url: None,
                    error: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Release failed");
                // Only a terminal machine rejects the failure, and then it
                // already carries its own error state.
                let _ = run
                    .transition(WorkflowEvent::Failed {
                        message: e.to_string(),
                    })
                    .await;
                WorkflowResult {
                    state: run.machine.state().clone(),
                    release: None,
                    environment_url: None,
                    error: Some(e),
                }
            }
        }
    }

    /// `Ok(None)` when the user cancelled.
    async fn run(
        &self,
        run: &mut Run,
        mut identity: RepositoryIdentity,
        host: &dyn ReleaseHost,
    ) -> Result<Option<(Release, String)>> {
        run.transition(WorkflowEvent::Start).await?;
        run.progress(PREPARING_MESSAGE).await;

        ensure_credentials(&mut identity, &self.resolver).await?;
        let api = self
            .connector
            .connect(identity.account(), identity.credentials())?;
        let session = RepositorySession::new(identity, api, self.detector.clone());

        let (environments, heads) =
            futures::try_join!(session.environments(), session.remote_heads())?;

        run.transition(WorkflowEvent::EnvironmentsFetched {
            count: environments.len(),
        })
        .await?;
        if environments.is_empty() {
            return Err(Error::NoEnvironments);
        }

        let names: Vec<String> = environments.iter().map(|e| e.name.clone()).collect();
        let Some(environment) = host
            .choose_environment(&names)
            .await
            .and_then(|index| environments.get(index))
        else {
            run.transition(WorkflowEvent::SelectionCancelled).await?;
            return Ok(None);
        };

        let revision = heads.revision_for(environment)?;
        info!(
            environment_id = %environment.id,
            environment = %environment.name,
            revision = %revision,
            "Environment selected"
        );
        run.transition(WorkflowEvent::EnvironmentChosen).await?;

        let Some(note) = host.release_note(RELEASE_NOTE_PROMPT).await else {
            run.transition(WorkflowEvent::NoteCancelled).await?;
            return Ok(None);
        };
        run.transition(WorkflowEvent::NoteEntered).await?;

        if !host
            .confirm(&confirmation_message(&revision, &environment.name))
            .await
        {
            run.transition(WorkflowEvent::Declined).await?;
            return Ok(None);
        }
        run.transition(WorkflowEvent::Confirmed).await?;
        run.progress(&format!("Releasing {}", revision)).await;

        let release = session.release(environment.id, &revision, &note).await?;
        let url = session
            .identity()
            .release_environment_url(release.environment_id);
        info!(
            environment_id = %release.environment_id,
            revision = %revision,
            url = %url,
            "Release created"
        );

        host.open_url(&url).await;
        run.transition(WorkflowEvent::Released).await?;

        Ok(Some((release, url)))
    }
}

/// State of one run: the machine plus the event channel it reports to.
struct Run {
    machine: ReleaseMachine,
    tx: mpsc::Sender<ReleaseEvent>,
}

impl Run {
    async fn transition(&mut self, event: WorkflowEvent) -> Result<()> {
        let state = self.machine.handle(event)?.clone();
        let _ = self.tx.send(ReleaseEvent::StateChanged { state }).await;
        Ok(())
    }

    async fn progress(&self, message: &str) {
        let _ = self
            .tx
            .send(ReleaseEvent::Progress {
                message: message.to_string(),
            })
            .await;
    }
}
