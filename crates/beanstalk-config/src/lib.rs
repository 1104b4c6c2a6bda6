//! Settings and credential resolution for Beanstalk tools.
//!
//! This crate handles:
//! - Parsing the KDL settings document
//! - The process-wide credentials cache
//! - Falling back to the platform secret store

pub mod credentials;
pub mod error;
pub mod keychain;
pub mod settings;

pub use credentials::{CredentialResolver, CredentialsCache};
pub use error::{ConfigError, ConfigResult};
pub use keychain::{KeychainStore, default_secret_store};
pub use settings::{CredentialEntry, DEFAULT_SETTINGS, SETTINGS_FILE_NAME, Settings, parse_settings};
