// Executor configuration

use crate::executor::types::ExecOptions;
use std::path::PathBuf;

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Directory whose node_modules is searched first (empty means the working directory)
    pub root: PathBuf,
    /// Shell path for command execution
    pub shell: String,
    /// Options used when the caller has none of its own
    pub default_options: ExecOptions,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            shell: String::from("/bin/sh"),
            default_options: ExecOptions::default(),
        }
    }
}
