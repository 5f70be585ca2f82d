// Shell collaborator trait

use crate::executor::{ExecOptions, ExecOutput, Result};
use async_trait::async_trait;

/// Runs a fully resolved command line
///
/// A non-zero exit is reported through [`ExecOutput::code`], not as an error.
#[async_trait]
pub trait Shell: Send + Sync {
    /// Run the command and block until it exits
    fn exec(&self, command: &str, options: &ExecOptions) -> Result<ExecOutput>;

    /// Run the command on the tokio runtime
    async fn exec_async(&self, command: &str, options: &ExecOptions) -> Result<ExecOutput>;
}
