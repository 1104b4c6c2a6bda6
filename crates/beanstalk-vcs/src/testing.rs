//! A scripted [`CommandRunner`] for tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::command::{CommandOutput, CommandRunner};
use crate::error::VcsResult;

/// Answers commands from a fixed script keyed by `"program arg1 arg2"`.
/// Unscripted commands exit non-zero with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    script: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed with `stdout` when `command` runs.
    pub fn on(mut self, command: &str, stdout: &str) -> Self {
        self.script.insert(
            command.to_string(),
            CommandOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Fail with `stderr` when `command` runs.
    pub fn on_failure(mut self, command: &str, stderr: &str) -> Self {
        self.script.insert(
            command.to_string(),
            CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str], _dir: &Path) -> VcsResult<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }

        Ok(self.script.get(&line).cloned().unwrap_or_default())
    }
}
