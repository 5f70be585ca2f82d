// Resolver configuration

use std::path::{Path, PathBuf};

/// Resolver configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Install root whose node_modules is searched last (skipped when None)
    pub global_root: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            global_root: default_global_root(),
        }
    }
}

impl ResolverConfig {
    /// Configuration with an explicit global root
    pub fn with_global_root(global_root: impl Into<PathBuf>) -> Self {
        Self {
            global_root: Some(global_root.into()),
        }
    }
}

/// Root of a global install containing this executable
///
/// `<root>/node_modules/<package>/bin/nodecli` yields `<root>`.
pub fn default_global_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    install_root_of(&exe)
}

fn install_root_of(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.ancestors().nth(3).map(Path::to_path_buf)
}
