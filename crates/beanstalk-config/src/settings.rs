//! Plugin settings parsing.
//!
//! Settings live in a KDL document:
//!
//! ```kdl
//! debug-mode #true
//! credentials "acme" "jane" "s3cret" "globex" "joe" "hunter2"
//! ```
//!
//! Credentials may also be written as a block with one node per account:
//!
//! ```kdl
//! credentials {
//!     acme "jane" "s3cret"
//! }
//! ```

use std::path::{Path, PathBuf};

use beanstalk_core::Credentials;
use kdl::{KdlDocument, KdlNode, KdlValue};
use tracing::debug;

use crate::{ConfigError, ConfigResult};

/// File name of the user settings document.
pub const SETTINGS_FILE_NAME: &str = "beanstalk.kdl";

/// Settings written for users who have none yet.
pub const DEFAULT_SETTINGS: &str = r#"// Beanstalk Tools settings

// Log every VCS command and API call.
debug-mode #false

// HTTP credentials, as "account" "username" "password" triples.
// Accounts missing here are looked up in the system keychain where available.
credentials
"#;

/// HTTP credentials configured for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    pub account: String,
    pub credentials: Credentials,
}

/// Immutable settings snapshot, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub debug_mode: bool,
    pub credentials: Vec<CredentialEntry>,
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        parse_settings(&content)
    }

    /// Ensure a user settings file exists in `dir`, seeding it with
    /// [`DEFAULT_SETTINGS`]. An existing file is never overwritten.
    pub fn ensure_user_settings(dir: &Path) -> ConfigResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(SETTINGS_FILE_NAME);

        if !path.exists() {
            std::fs::write(&path, DEFAULT_SETTINGS)?;
            debug!(path = %path.display(), "Wrote default settings");
        }

        Ok(path)
    }
}

/// Parse settings from KDL text.
pub fn parse_settings(kdl: &str) -> ConfigResult<Settings> {
    let doc: KdlDocument = kdl.parse()?;
    let mut settings = Settings::default();

    for node in doc.nodes() {
        match node.name().value() {
            "debug-mode" | "debug_mode" => {
                settings.debug_mode = parse_bool_arg(node)?;
            }
            "credentials" => {
                settings.credentials.extend(parse_credential_triples(node)?);

                if let Some(children) = node.children() {
                    for child in children.nodes() {
                        settings.credentials.push(parse_credential_node(child)?);
                    }
                }
            }
            _ => {} // Ignore unknown nodes
        }
    }

    Ok(settings)
}

fn parse_bool_arg(node: &KdlNode) -> ConfigResult<bool> {
    match positional_args(node).first() {
        None => Ok(true),
        Some(value) => value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
            field: node.name().value().to_string(),
            message: format!("expected a boolean, found {}", value),
        }),
    }
}

fn parse_credential_triples(node: &KdlNode) -> ConfigResult<Vec<CredentialEntry>> {
    let values = string_args(node)?;

    // An incomplete trailing triple is ignored
    Ok(values
        .chunks_exact(3)
        .map(|triple| CredentialEntry {
            account: triple[0].clone(),
            credentials: Credentials::new(triple[1].clone(), triple[2].clone()),
        })
        .collect())
}

fn parse_credential_node(node: &KdlNode) -> ConfigResult<CredentialEntry> {
    let account = node.name().value().to_string();
    let values = string_args(node)?;

    match values.as_slice() {
        [username, password, ..] => Ok(CredentialEntry {
            account,
            credentials: Credentials::new(username.clone(), password.clone()),
        }),
        _ => Err(ConfigError::InvalidValue {
            field: format!("credentials.{}", account),
            message: "expected a username and a password".to_string(),
        }),
    }
}

fn positional_args(node: &KdlNode) -> Vec<&KdlValue> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .map(|e| e.value())
        .collect()
}

fn string_args(node: &KdlNode) -> ConfigResult<Vec<String>> {
    positional_args(node)
        .into_iter()
        .map(|value| {
            value
                .as_string()
                .map(|s| s.to_string())
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: node.name().value().to_string(),
                    message: format!("expected a string, found {}", value),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_credentials() {
        let kdl = r#"
            debug-mode #true
            credentials "acme" "jane" "s3cret" "globex" "joe" "hunter2"
        "#;

        let settings = parse_settings(kdl).unwrap();
        assert!(settings.debug_mode);
        assert_eq!(settings.credentials.len(), 2);
        assert_eq!(settings.credentials[0].account, "acme");
        assert_eq!(settings.credentials[0].credentials.username, "jane");
        assert_eq!(settings.credentials[1].credentials.password, "hunter2");
    }

    #[test]
    fn test_incomplete_triple_is_ignored() {
        let settings = parse_settings(r#"credentials "acme" "jane" "s3cret" "globex" "joe""#).unwrap();
        assert_eq!(settings.credentials.len(), 1);
        assert_eq!(settings.credentials[0].account, "acme");
    }

    #[test]
    fn test_parse_credentials_block() {
        let kdl = r#"
            credentials {
                acme "jane" "s3cret"
            }
        "#;

        let settings = parse_settings(kdl).unwrap();
        assert!(!settings.debug_mode);
        assert_eq!(
            settings.credentials,
            vec![CredentialEntry {
                account: "acme".to_string(),
                credentials: Credentials::new("jane", "s3cret"),
            }]
        );
    }

    #[test]
    fn test_block_entry_without_password_is_rejected() {
        let err = parse_settings("credentials {\n acme \"jane\"\n}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_non_boolean_debug_mode_is_rejected() {
        let err = parse_settings(r#"debug-mode "yes""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_default_settings_parse() {
        let settings = parse_settings(DEFAULT_SETTINGS).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE_NAME)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_ensure_user_settings_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();

        let path = Settings::ensure_user_settings(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_SETTINGS);

        std::fs::write(&path, r#"credentials "acme" "jane" "s3cret""#).unwrap();
        Settings::ensure_user_settings(dir.path()).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.credentials.len(), 1);
    }
}
