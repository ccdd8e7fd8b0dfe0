//! Scanner adapter that shells out to an external axe runner.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};

use sentinel_core::config::ScannerConfig;
use sentinel_core::errors::CollaboratorError;
use sentinel_core::traits::AccessibilityScanner;
use sentinel_core::types::{RawViolation, ScanTarget};

use super::axe::parse_axe_results;

const TARGET_PLACEHOLDER: &str = "{target}";

/// Runs `command args...` with `{target}` substituted and parses its stdout
/// as axe-core JSON. The process is killed once `timeout` elapses.
#[derive(Debug, Clone)]
pub struct CommandScanner {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandScanner {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(
            config.effective_command(),
            config.effective_args(),
            Duration::from_secs(config.effective_timeout_secs()),
        )
    }

    fn args_for(&self, url: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.replace(TARGET_PLACEHOLDER, url))
            .collect()
    }

    fn run(&self, url: &str) -> Result<String, String> {
        let mut child = Command::new(&self.command)
            .args(self.args_for(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to start `{}`: {e}", self.command))?;

        let mut stdout = child.stdout.take().ok_or("stdout not captured")?;
        let mut stderr = child.stderr.take().ok_or("stderr not captured")?;

        let (tx, rx) = bounded::<std::io::Result<String>>(1);
        thread::Builder::new()
            .name("sentinel-scanner-stdout".to_string())
            .spawn(move || {
                let mut buf = String::new();
                let res = stdout.read_to_string(&mut buf).map(|_| buf);
                let _ = tx.send(res);
            })
            .map_err(|e| format!("failed to spawn reader: {e}"))?;
        let stderr_reader = thread::Builder::new()
            .name("sentinel-scanner-stderr".to_string())
            .spawn(move || {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf);
                buf
            })
            .map_err(|e| format!("failed to spawn reader: {e}"))?;

        let output = match rx.recv_timeout(self.timeout) {
            Ok(res) => res.map_err(|e| format!("failed to read scanner output: {e}"))?,
            Err(RecvTimeoutError::Timeout) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!("timed out after {}s", self.timeout.as_secs()));
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err("scanner output reader exited early".to_string());
            }
        };

        let status = child
            .wait()
            .map_err(|e| format!("failed to wait for scanner: {e}"))?;
        let errors = stderr_reader.join().unwrap_or_default();
        if !status.success() {
            return Err(format!("exited with {status}: {}", errors.trim()));
        }
        Ok(output)
    }
}

impl AccessibilityScanner for CommandScanner {
    fn scan(&self, target: &ScanTarget) -> Result<Vec<RawViolation>, CollaboratorError> {
        tracing::info!(url = %target.url, command = %self.command, "analyzing accessibility");
        let scanner_err = |reason: String| CollaboratorError::Scanner {
            target: target.url.clone(),
            reason,
        };

        let output = self.run(&target.url).map_err(scanner_err)?;
        let violations = parse_axe_results(&output)
            .map_err(|e| scanner_err(format!("invalid axe output: {e}")))?;
        tracing::debug!(url = %target.url, violations = violations.len(), "scanner finished");
        Ok(violations)
    }
}
