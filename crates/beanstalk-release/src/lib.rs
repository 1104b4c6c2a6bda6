//! Release workflow for deploying a revision to a Beanstalk environment.
//!
//! A run fetches the repository's environments and the remote heads
//! concurrently, asks the user for an environment, a release note and a
//! confirmation, then creates the release and opens the environment page.
//! Every step is a transition of [`ReleaseMachine`].

pub mod gate;
pub mod guard;
pub mod host;
pub mod session;
pub mod state;
pub mod workflow;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use gate::ensure_credentials;
pub use guard::{ReleaseGuard, ReleaseTicket};
pub use host::{RELEASE_NOTE_PROMPT, ReleaseHost, confirmation_message};
pub use session::RepositorySession;
pub use state::{ReleaseMachine, WorkflowEvent, WorkflowState};
pub use workflow::{PREPARING_MESSAGE, ReleaseEvent, ReleaseWorkflow, WorkflowResult};
