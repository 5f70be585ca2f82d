// Data types for Executor module

use serde::Serialize;
use std::path::PathBuf;

/// Result of running a command through the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecOutput {
    /// Exit code (-1 when terminated by a signal)
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn new(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Options for a single execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Working directory for the shell
    pub cwd: Option<PathBuf>,
    /// Extra environment variables (merged over the inherited environment)
    pub env: Vec<(String, String)>,
    /// Do not echo captured output to the parent's stdout/stderr
    pub silent: bool,
    /// Kill the shell after this many seconds
    pub timeout_secs: Option<u64>,
}

impl ExecOptions {
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Default::default()
        }
    }
}
