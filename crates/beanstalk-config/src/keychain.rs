//! macOS keychain access through the `security` tool.

use std::process::Stdio;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use beanstalk_core::secret::{NoSecretStore, SecretStore};
use beanstalk_core::{Credentials, Error, Result};
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

static ACCOUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""acct"<blob>="([^"]*)""#).unwrap());

static PASSWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^password: "(.*)"\s*$"#).unwrap());

// Passwords with non-printable bytes: `password: 0x<hex>  "<escaped>"`
static HEX_PASSWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^password: 0x([0-9A-Fa-f]+)\b").unwrap());

/// Looks up internet passwords in the user's default keychain.
#[derive(Debug, Clone)]
pub struct KeychainStore {
    program: String,
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeychainStore {
    pub fn new() -> Self {
        Self {
            program: "security".to_string(),
        }
    }
}

#[async_trait]
impl SecretStore for KeychainStore {
    async fn find_credentials(
        &self,
        server: &str,
        username: Option<&str>,
    ) -> Result<Option<Credentials>> {
        let mut args = vec!["find-internet-password", "-s", server];
        if let Some(username) = username {
            args.extend(["-a", username]);
        }
        args.push("-g");

        debug!(server = %server, "Querying keychain");

        let output = Command::new(&self.program)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::Internal(format!("failed to run {}: {}", self.program, e)))?;

        // Exit status 44 means no matching item
        if !output.status.success() {
            return Ok(None);
        }

        Ok(parse_security_output(
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        ))
    }
}

/// Extract the account attribute (stdout) and password (stderr) printed by
/// `security find-internet-password -g`.
fn parse_security_output(stdout: &str, stderr: &str) -> Option<Credentials> {
    let username = ACCOUNT_REGEX.captures(stdout)?.get(1)?.as_str();
    let password = parse_password(stderr)?;

    let credentials = Credentials::new(username, password);
    credentials.is_complete().then_some(credentials)
}

fn parse_password(stderr: &str) -> Option<String> {
    if let Some(captures) = HEX_PASSWORD_REGEX.captures(stderr) {
        let bytes = hex::decode(captures.get(1)?.as_str()).ok()?;
        return String::from_utf8(bytes).ok();
    }

    Some(PASSWORD_REGEX.captures(stderr)?.get(1)?.as_str().to_string())
}

/// The secret store available on this platform.
pub fn default_secret_store() -> Arc<dyn SecretStore> {
    if cfg!(target_os = "macos") {
        Arc::new(KeychainStore::new())
    } else {
        Arc::new(NoSecretStore)
    }
}
