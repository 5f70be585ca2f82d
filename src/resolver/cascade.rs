// Resolution cascade

use crate::resolver::config::ResolverConfig;
use crate::resolver::manifest::PackageManifest;
use crate::resolver::probe::{Probe, SystemProbe};
use crate::resolver::types::ResolvedCommand;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const NODE_MODULES: &str = "node_modules";
const BIN_DIR: &str = ".bin";
const MANIFEST: &str = "package.json";

/// Finds the command that runs a dependency-provided CLI
#[derive(Clone)]
pub struct Resolver {
    config: ResolverConfig,
    probe: Arc<dyn Probe>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, probe: Arc<dyn Probe>) -> Self {
        Self { config, probe }
    }

    /// Resolve `name`, rendering the result as a command string
    ///
    /// Returns an empty string when nothing matches.
    pub fn resolve_command(&self, name: &str, root: impl AsRef<Path>) -> String {
        self.resolve(name, root)
            .map(|resolved| resolved.as_command())
            .unwrap_or_default()
    }

    /// Resolve `name` against `root`, then PATH, then the global root
    pub fn resolve(&self, name: &str, root: impl AsRef<Path>) -> Option<ResolvedCommand> {
        let root = root.as_ref();

        if name.is_empty() {
            return None;
        }

        if let Some(found) = self.lookup_local(name, root) {
            debug!(cli = %name, root = %root.display(), source = found.source(), "resolved locally");
            return Some(found);
        }

        if let Some(path) = self.probe.which(name) {
            debug!(cli = %name, path = %path.display(), "resolved on PATH");
            return Some(ResolvedCommand::OnPath(name.to_string()));
        }

        if let Some(global_root) = &self.config.global_root {
            if let Some(found) = self.lookup_local(name, global_root) {
                debug!(cli = %name, root = %global_root.display(), source = found.source(), "resolved in global root");
                return Some(found);
            }
        }

        debug!(cli = %name, root = %root.display(), "not resolved");
        None
    }

    /// `node_modules/.bin/<name>`, then the package manifest `bin` entry
    fn lookup_local(&self, name: &str, root: &Path) -> Option<ResolvedCommand> {
        let node_modules = root.join(NODE_MODULES);

        let shim = node_modules.join(BIN_DIR).join(name);
        if self.probe.is_file(&shim) {
            return Some(ResolvedCommand::LocalBin(shim));
        }

        let package_dir = node_modules.join(name);
        let manifest_path = package_dir.join(MANIFEST);
        if !self.probe.is_file(&manifest_path) {
            return None;
        }

        let manifest = self
            .probe
            .read_to_string(&manifest_path)
            .map_err(|e| e.to_string())
            .and_then(|content| PackageManifest::parse(&content).map_err(|e| e.to_string()));

        match manifest {
            Ok(manifest) => manifest
                .bin_for(name)
                .map(|script| script.trim_start_matches("./"))
                .map(|script| ResolvedCommand::PackageScript(package_dir.join(script))),
            Err(e) => {
                warn!(path = %manifest_path.display(), error = %e, "ignoring unreadable package manifest");
                None
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default(), Arc::new(SystemProbe::new()))
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
