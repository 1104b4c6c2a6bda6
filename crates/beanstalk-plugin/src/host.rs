//! The editor the plugin runs in.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use beanstalk_release::ReleaseHost;

/// Editor window capabilities on top of the release prompts.
#[async_trait]
pub trait EditorHost: ReleaseHost {
    /// Path of the file in the active view, if it has one.
    fn active_file(&self) -> Option<PathBuf>;

    /// Project folders of the window, in order.
    fn folders(&self) -> Vec<PathBuf>;

    /// Modal error dialog.
    async fn show_error(&self, message: &str);

    /// Modal informational dialog.
    async fn show_message(&self, message: &str);

    /// Transient status bar text.
    async fn set_status(&self, message: &str);

    /// Open `path` in a new view.
    async fn open_file(&self, path: &Path);
}
