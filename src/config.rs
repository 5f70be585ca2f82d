// Layered configuration: defaults, TOML file, environment

use crate::executor::ExecutorConfig;
use crate::resolver::ResolverConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Settings accepted in the TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub global_root: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub shell: Option<String>,
    pub silent: Option<bool>,
    pub timeout_secs: Option<u64>,
}

/// Fully merged configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub resolver: ResolverConfig,
    pub executor: ExecutorConfig,
}

impl AppConfig {
    /// Defaults, overlaid with the config file (if any) and then the environment
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = AppConfig::default();

        let path = explicit
            .map(Path::to_path_buf)
            .or_else(default_config_path);
        if let Some(path) = path {
            // A missing default file is fine; a missing explicit one is not
            if explicit.is_some() || path.exists() {
                config.apply_file(&load_file(&path)?);
            } else {
                debug!(path = %path.display(), "config file not found, using defaults");
            }
        }

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn apply_file(&mut self, file: &FileConfig) {
        if let Some(global_root) = &file.global_root {
            self.resolver.global_root = Some(global_root.clone());
        }
        if let Some(root) = &file.root {
            self.executor.root = root.clone();
        }
        if let Some(shell) = &file.shell {
            self.executor.shell = shell.clone();
        }
        if let Some(silent) = file.silent {
            self.executor.default_options.silent = silent;
        }
        if let Some(secs) = file.timeout_secs {
            self.executor.default_options.timeout_secs = Some(secs);
        }
    }

    /// Overlay `NODECLI_*` variables read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(global_root) = lookup("NODECLI_GLOBAL_ROOT").filter(|v| !v.is_empty()) {
            self.resolver.global_root = Some(PathBuf::from(global_root));
        }
        if let Some(shell) = lookup("NODECLI_SHELL").filter(|v| !v.is_empty()) {
            self.executor.shell = shell;
        }
        if let Some(secs) = parse_env_var(&lookup, "NODECLI_TIMEOUT_SECS") {
            self.executor.default_options.timeout_secs = Some(secs);
        }
        if let Some(silent) = parse_env_var(&lookup, "NODECLI_SILENT") {
            self.executor.default_options.silent = silent;
        }
    }
}

/// Parse an environment variable, logging a warning if the value is present but invalid.
fn parse_env_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let v = lookup(name)?;
    match v.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(var = name, value = %v, "Invalid env var value, ignoring");
            None
        }
    }
}

/// `<config dir>/nodecli/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nodecli").join("config.toml"))
}

pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FileConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded config file");
    Ok(file)
}
