// Main Executor implementation

use crate::executor::config::ExecutorConfig;
use crate::executor::error::{ExecutorError, Result};
use crate::executor::shell::Shell;
use crate::executor::system::SystemShell;
use crate::executor::types::{ExecOptions, ExecOutput};
use crate::resolver::Resolver;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Resolves the CLI named by a command line and runs it through a shell
pub struct Executor {
    config: ExecutorConfig,
    resolver: Resolver,
    shell: Arc<dyn Shell>,
}

impl Executor {
    pub fn new(config: ExecutorConfig, resolver: Resolver, shell: Arc<dyn Shell>) -> Self {
        debug!(
            root = %config.root.display(),
            shell = %config.shell,
            "initializing executor"
        );

        Self {
            config,
            resolver,
            shell,
        }
    }

    /// Executor running commands through the configured system shell
    pub fn with_system_shell(config: ExecutorConfig, resolver: Resolver) -> Self {
        let shell = Arc::new(SystemShell::new(config.shell.clone())) as Arc<dyn Shell>;
        Self::new(config, resolver, shell)
    }

    /// Resolve the binary of `command` and rebuild the command line around it
    pub fn prepare(&self, command: &str) -> Result<String> {
        let (name, args) = split_command(command).ok_or(ExecutorError::EmptyCommand)?;

        let mut resolved = self
            .resolver
            .resolve(name, &self.config.root)
            .ok_or_else(|| ExecutorError::BinaryNotFound(name.to_string()))?;

        // The shell may run from another directory
        if resolved.is_relative() {
            resolved = resolved.anchored_at(&std::env::current_dir()?);
        }

        let mut line = resolved.as_command();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }

        debug!(cli = %name, source = resolved.source(), line = %line, "prepared command");
        Ok(line)
    }

    /// Run `command`, blocking until it exits
    ///
    /// Without `options` the configured defaults apply.
    pub fn execute(&self, command: &str, options: Option<&ExecOptions>) -> Result<ExecOutput> {
        let line = self.prepare(command)?;
        info!(command = %line, "executing");
        self.shell
            .exec(&line, options.unwrap_or(&self.config.default_options))
    }

    /// Run `command` on the tokio runtime
    pub async fn execute_async(
        &self,
        command: &str,
        options: Option<&ExecOptions>,
    ) -> Result<ExecOutput> {
        let line = self.prepare(command)?;
        info!(command = %line, "executing (async)");
        self.shell
            .exec_async(&line, options.unwrap_or(&self.config.default_options))
            .await
    }

    /// Run `command` in the background and hand the outcome to `callback`
    ///
    /// Resolution happens before returning, so a missing binary is reported
    /// here and the callback is never invoked for it.
    pub fn execute_with_callback<F>(
        &self,
        command: &str,
        options: Option<ExecOptions>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<ExecOutput>) + Send + 'static,
    {
        let line = self.prepare(command)?;
        let options = options.unwrap_or_else(|| self.config.default_options.clone());
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|_| ExecutorError::NoRuntime(line.clone()))?;

        info!(command = %line, "executing (background)");
        let shell = Arc::clone(&self.shell);
        Ok(handle.spawn(async move {
            let result = shell.exec_async(&line, &options).await;
            callback(result);
        }))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::with_system_shell(ExecutorConfig::default(), Resolver::default())
    }
}

/// Split a command line into the binary name and its arguments
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_separates_name_and_args() {
        let (name, args) = split_command("npm run build --silent").unwrap();
        assert_eq!(name, "npm");
        assert_eq!(args, vec!["run", "build", "--silent"]);
    }

    #[test]
    fn split_collapses_repeated_whitespace() {
        let (name, args) = split_command("  eslint\t src   lib ").unwrap();
        assert_eq!(name, "eslint");
        assert_eq!(args, vec!["src", "lib"]);
    }

    #[test]
    fn split_rejects_blank_input() {
        assert!(split_command("").is_none());
        assert!(split_command("   ").is_none());
    }
}
