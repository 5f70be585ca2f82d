// Error types for Executor module

use thiserror::Error;

/// Executor error types
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Couldn't find the CLI {0}.")]
    BinaryNotFound(String),

    #[error("Empty command")]
    EmptyCommand,

    #[error("Failed to spawn shell for '{0}': {1}")]
    SpawnFailed(String, String),

    #[error("Execution timeout for '{0}' after {1} seconds")]
    Timeout(String, u64),

    #[error("No tokio runtime available to run '{0}' in the background")]
    NoRuntime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExecutorError>;
