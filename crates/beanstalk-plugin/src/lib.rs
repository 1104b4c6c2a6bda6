//! Editor integration for Beanstalk-hosted repositories.
//!
//! The editor implements [`EditorHost`] and forwards its commands to
//! [`Plugin::run`]. Link commands open pages of the hosted repository;
//! the deploy command runs the release workflow in the background.

pub mod command;
pub mod host;
pub mod logging;
pub mod messages;
pub mod plugin;

pub use command::PluginCommand;
pub use host::EditorHost;
pub use logging::init_logging;
pub use messages::{Remediation, UserMessage, user_message};
pub use plugin::{CommandOutcome, Plugin};
