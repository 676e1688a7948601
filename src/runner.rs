use std::process::Command;

use crate::errors::ExecutionError;

/// Runs one command string at a time through a shell, synchronously.
pub struct ShellRunner {
    shell: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("zsh")
    }
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Run `command` via `<shell> -c`, returning captured stdout.
    /// A non-zero exit yields an ExecutionError carrying stderr; the
    /// caller decides whether to continue the batch.
    pub fn run(&self, command: &str) -> Result<String, ExecutionError> {
        log::debug!("spawning {} -c {:?}", self.shell, command);
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|err| ExecutionError {
                code: None,
                stderr: format!("failed to spawn {}: {}", self.shell, err),
            })?;

        if !output.status.success() {
            return Err(ExecutionError {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
