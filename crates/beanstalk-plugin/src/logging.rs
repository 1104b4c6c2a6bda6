//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter for the given debug toggle.
pub fn default_filter(debug_mode: bool) -> &'static str {
    if debug_mode {
        "warn,beanstalk_plugin=debug,beanstalk_release=debug,beanstalk_vcs=debug,beanstalk_api=debug,beanstalk_config=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(debug_mode: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(debug_mode))),
        )
        .with_target(debug_mode)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
