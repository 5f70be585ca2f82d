use clap::{Parser, Subcommand};
use nodecli::config::AppConfig;
use nodecli::executor::Executor;
use nodecli::resolver::{Resolver, SystemProbe};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, Level};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "nodecli")]
#[command(about = "Resolve and run CLIs installed in node_modules")]
struct Args {
    /// Config file (default: <config dir>/nodecli/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Install root searched after PATH
    #[arg(long, global = true)]
    global_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the command that runs a CLI
    Which {
        name: String,

        /// Directory whose node_modules is searched first
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Resolve the CLI of a command line and run it
    Exec {
        /// Directory whose node_modules is searched first
        #[arg(long)]
        root: Option<PathBuf>,

        /// Working directory for the shell
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Do not echo the command's output
        #[arg(long)]
        silent: bool,

        /// Kill the command after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print exit code and captured output as JSON
        #[arg(long)]
        json: bool,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!(error = %e, "nodecli failed");
            eprintln!("nodecli: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<u8, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(global_root) = args.global_root {
        config.resolver.global_root = Some(global_root);
    }

    let probe = SystemProbe::new();
    debug!(
        global_root = ?config.resolver.global_root,
        path_entries = probe.search_path().len(),
        "configuration loaded"
    );
    let resolver = Resolver::new(config.resolver.clone(), Arc::new(probe));

    match args.command {
        Command::Which { name, root } => {
            let root = root.unwrap_or_else(|| config.executor.root.clone());
            let command = resolver.resolve_command(&name, &root);
            if command.is_empty() {
                return Ok(1);
            }
            println!("{command}");
            Ok(0)
        }
        Command::Exec {
            root,
            cwd,
            silent,
            timeout,
            json,
            command,
        } => {
            if let Some(root) = root {
                config.executor.root = root;
            }

            let mut options = config.executor.default_options.clone();
            options.cwd = cwd.or(options.cwd);
            options.silent = options.silent || silent || json;
            options.timeout_secs = timeout.or(options.timeout_secs);

            let executor = Executor::with_system_shell(config.executor, resolver);
            let output = executor
                .execute_async(&command.join(" "), Some(&options))
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            Ok(u8::try_from(output.code).unwrap_or(1))
        }
    }
}
