//! The user interface a release workflow talks to.

use async_trait::async_trait;

/// Prompt shown when asking for a release note.
pub const RELEASE_NOTE_PROMPT: &str = "Enter a deployment note:";

/// User interaction points of a release.
///
/// Each call suspends the workflow until the user answers; the worker
/// task never blocks the host while waiting.
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Let the user pick one of `names`. `None` when the picker is
    /// dismissed.
    async fn choose_environment(&self, names: &[String]) -> Option<usize>;

    /// Ask for free text. `None` when the prompt is cancelled; an empty
    /// string is a valid note.
    async fn release_note(&self, prompt: &str) -> Option<String>;

    /// Yes/no confirmation.
    async fn confirm(&self, message: &str) -> bool;

    /// Open `url` in the default browser.
    async fn open_url(&self, url: &str);
}

/// Confirmation question for deploying `revision` to `environment`.
pub fn confirmation_message(revision: &str, environment: &str) -> String {
    format!(
        "Are you sure you want to deploy revision {} to {}?",
        revision, environment
    )
}
