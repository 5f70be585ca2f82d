// Data types for Resolver module

use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand {
    /// Shim found under a `node_modules/.bin` directory
    LocalBin(PathBuf),
    /// Found on PATH, invoked by the name it was asked for
    OnPath(String),
    /// Script declared in a package manifest `bin` field, run through node
    PackageScript(PathBuf),
}

impl ResolvedCommand {
    /// Render the command string handed to the shell
    pub fn as_command(&self) -> String {
        match self {
            ResolvedCommand::LocalBin(path) => shell_quote(&slash_path(path)),
            ResolvedCommand::OnPath(name) => shell_quote(name),
            ResolvedCommand::PackageScript(path) => {
                format!("node {}", shell_quote(&slash_path(path)))
            }
        }
    }

    /// Tier label used in logs
    pub fn source(&self) -> &'static str {
        match self {
            ResolvedCommand::LocalBin(_) => "bin",
            ResolvedCommand::OnPath(_) => "path",
            ResolvedCommand::PackageScript(_) => "manifest",
        }
    }

    /// Whether the command depends on the working directory it runs from
    pub fn is_relative(&self) -> bool {
        match self {
            ResolvedCommand::LocalBin(path) | ResolvedCommand::PackageScript(path) => {
                path.is_relative()
            }
            ResolvedCommand::OnPath(name) => has_separator(name) && Path::new(name).is_relative(),
        }
    }

    /// Make a relative command absolute by joining it onto `base`
    pub fn anchored_at(self, base: &Path) -> Self {
        if !self.is_relative() {
            return self;
        }
        match self {
            ResolvedCommand::LocalBin(path) => ResolvedCommand::LocalBin(base.join(path)),
            ResolvedCommand::PackageScript(path) => ResolvedCommand::PackageScript(base.join(path)),
            ResolvedCommand::OnPath(name) => ResolvedCommand::OnPath(slash_path(&base.join(name))),
        }
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_command())
    }
}

/// Paths are always rendered with forward slashes
fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn has_separator(name: &str) -> bool {
    name.contains('/') || name.contains(std::path::MAIN_SEPARATOR)
}

/// Single-quote `word` for `sh` unless it only holds characters the shell leaves alone
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
