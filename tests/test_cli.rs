// Integration tests for the nodecli binary
// This file should be run with cargo test --test test_cli
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[cfg(unix)]
fn create_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Isolated project, PATH, home and global root
struct Sandbox {
    project: TempDir,
    path_dir: TempDir,
    home: TempDir,
    global: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            path_dir: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
            global: TempDir::new().unwrap(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("nodecli"));
        cmd.current_dir(self.project.path())
            .env("PATH", self.path_dir.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path())
            .env_remove("NODECLI_GLOBAL_ROOT")
            .env_remove("NODECLI_SHELL")
            .env_remove("NODECLI_TIMEOUT_SECS")
            .env_remove("NODECLI_SILENT")
            .arg("--global-root")
            .arg(self.global.path());
        cmd
    }

    fn local_bin(&self, name: &str) -> std::path::PathBuf {
        self.project.path().join("node_modules/.bin").join(name)
    }
}

#[cfg(unix)]
#[test]
fn which_prints_local_bin() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    create_script(&sandbox.local_bin("a"), "exit 0");

    sandbox
        .command()
        .args(["which", "a", "--root"])
        .arg(sandbox.project.path())
        .assert()
        .success()
        .stdout(format!("{}\n", sandbox.local_bin("a").display()));
    Ok(())
}

#[cfg(unix)]
#[test]
fn which_prints_bare_name_found_on_path() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    create_script(&sandbox.path_dir.path().join("tool"), "exit 0");

    sandbox
        .command()
        .args(["which", "tool"])
        .assert()
        .success()
        .stdout("tool\n");
    Ok(())
}

#[test]
fn which_unresolved_prints_nothing_and_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .args(["which", "foo"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn which_uses_global_root_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let other_global = TempDir::new()?;
    create_script(&other_global.path().join("node_modules/.bin/mocha"), "exit 0");
    let config = sandbox.home.path().join("custom.toml");
    fs::write(
        &config,
        format!("global_root = \"{}\"\n", other_global.path().display()),
    )?;

    // An explicit --global-root beats the file, so build the command without it
    Command::new(cargo_bin("nodecli"))
        .current_dir(sandbox.project.path())
        .env("PATH", sandbox.path_dir.path())
        .env_remove("NODECLI_GLOBAL_ROOT")
        .arg("--config")
        .arg(&config)
        .args(["which", "mocha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("node_modules/.bin/mocha"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn exec_echoes_output() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    create_script(&sandbox.local_bin("greet"), "echo \"hi $1\"");

    sandbox
        .command()
        .args(["exec", "--", "greet", "there"])
        .assert()
        .success()
        .stdout("hi there\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn exec_passes_exit_code_through() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    create_script(&sandbox.local_bin("fail"), "exit 7");

    sandbox
        .command()
        .args(["exec", "--", "fail"])
        .assert()
        .code(7);
    Ok(())
}

#[cfg(unix)]
#[test]
fn exec_json_reports_code_and_output() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    create_script(&sandbox.local_bin("greet"), "echo \"hi $1\"; echo warn >&2; exit 2");

    let assert = sandbox
        .command()
        .args(["exec", "--json", "--", "greet", "you"])
        .assert()
        .code(2);

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let output: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(output["code"], 2);
    assert_eq!(output["stdout"], "hi you\n");
    assert_eq!(output["stderr"], "warn\n");
    Ok(())
}

#[test]
fn exec_unknown_cli_fails() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .args(["exec", "--", "nope", "arg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Couldn't find the CLI nope."));
    Ok(())
}

#[test]
fn missing_config_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .arg("--config")
        .arg(sandbox.home.path().join("absent.toml"))
        .args(["which", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error reading"));
    Ok(())
}
