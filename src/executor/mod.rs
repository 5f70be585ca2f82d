// Executor module - resolves a CLI name and hands the command line to a shell

pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod system;
pub mod types;

pub use config::ExecutorConfig;
pub use error::{ExecutorError, Result};
pub use runner::Executor;
pub use shell::Shell;
pub use system::SystemShell;
pub use types::{ExecOptions, ExecOutput};
