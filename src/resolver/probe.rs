// Filesystem and PATH access for the resolver

use std::io;
use std::path::{Path, PathBuf};

/// Environment seam consulted by the resolver
pub trait Probe: Send + Sync {
    /// Whether a regular file exists at `path`
    fn is_file(&self, path: &Path) -> bool;

    /// First executable named `name` on the search path
    ///
    /// A name containing a path separator is checked relative to the
    /// working directory instead.
    fn which(&self, name: &str) -> Option<PathBuf>;

    /// Read a text file
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Probe backed by the real filesystem and a PATH list
#[derive(Debug, Clone)]
pub struct SystemProbe {
    search_path: Vec<PathBuf>,
}

impl SystemProbe {
    /// Probe using the process `PATH`
    pub fn new() -> Self {
        Self::with_search_path(parse_system_path())
    }

    /// Probe searching only the given directories
    pub fn with_search_path(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for SystemProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn which(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        let cwd = std::env::current_dir().ok()?;
        // An empty PATH string would search the working directory
        let paths = if self.search_path.is_empty() {
            None
        } else {
            Some(std::env::join_paths(&self.search_path).ok()?)
        };

        match paths {
            Some(paths) => which::which_in(name, Some(paths), cwd).ok(),
            None if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) => {
                which::which_in(name, None::<&str>, cwd).ok()
            }
            None => None,
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Parse the `PATH` environment variable into a list of directories
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_file(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn which_finds_executable_in_first_matching_dir() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_file(&second.path().join("tool"), 0o755);

        let probe = SystemProbe::with_search_path(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        assert_eq!(probe.which("tool"), Some(second.path().join("tool")));
    }

    #[cfg(unix)]
    #[test]
    fn which_skips_non_executable_files() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("tool"), 0o644);

        let probe = SystemProbe::with_search_path(vec![dir.path().to_path_buf()]);
        assert_eq!(probe.which("tool"), None);
    }

    #[cfg(unix)]
    #[test]
    fn which_accepts_paths_to_executables() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("x.sh");
        write_file(&script, 0o755);

        let probe = SystemProbe::with_search_path(Vec::new());
        let found = probe.which(script.to_str().unwrap()).unwrap();
        assert_eq!(found.canonicalize().unwrap(), script.canonicalize().unwrap());
        assert_eq!(probe.which(dir.path().join("missing.sh").to_str().unwrap()), None);
    }

    #[test]
    fn empty_name_finds_nothing() {
        let probe = SystemProbe::with_search_path(vec![PathBuf::from("/")]);
        assert_eq!(probe.which(""), None);
    }

    #[test]
    fn empty_search_path_finds_nothing() {
        let probe = SystemProbe::with_search_path(Vec::new());
        assert_eq!(probe.which("sh"), None);
    }
}
