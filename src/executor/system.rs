// Shell implementation backed by `<shell> -c`

use crate::executor::{ExecOptions, ExecOutput, ExecutorError, Result, Shell};
use async_trait::async_trait;
use std::io::{Read, Write};
use std::process::{Child, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs commands via `<program> -c <command>`, capturing stdout and stderr
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: String,
}

impl SystemShell {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn std_command(&self, command: &str, options: &ExecOptions) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &options.env {
            cmd.env(key, value);
        }

        // A timed command leads its own group so the whole tree can be killed
        #[cfg(unix)]
        if options.timeout_secs.is_some() {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        cmd
    }

    fn spawn_failed(&self, command: &str, e: std::io::Error) -> ExecutorError {
        ExecutorError::SpawnFailed(command.to_string(), format!("{}: {}", self.program, e))
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new("/bin/sh")
    }
}

#[async_trait]
impl Shell for SystemShell {
    fn exec(&self, command: &str, options: &ExecOptions) -> Result<ExecOutput> {
        let start = Instant::now();
        debug!(command = %command, shell = %self.program, "executing command");

        let mut child = self
            .std_command(command, options)
            .spawn()
            .map_err(|e| self.spawn_failed(command, e))?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match options.timeout_secs {
            Some(secs) => wait_with_deadline(&mut child, Duration::from_secs(secs))?
                .ok_or_else(|| ExecutorError::Timeout(command.to_string(), secs))?,
            None => child.wait()?,
        };

        let output = Output {
            status,
            stdout: stdout.and_then(|h| h.join().ok()).unwrap_or_default(),
            stderr: stderr.and_then(|h| h.join().ok()).unwrap_or_default(),
        };

        Ok(finish(command, output, start, options))
    }

    async fn exec_async(&self, command: &str, options: &ExecOptions) -> Result<ExecOutput> {
        let start = Instant::now();
        debug!(command = %command, shell = %self.program, "executing command (async)");

        let mut cmd = tokio::process::Command::from(self.std_command(command, options));
        cmd.kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| self.spawn_failed(command, e))?;
        let pid = child.id();

        let pending = child.wait_with_output();
        let output = match options.timeout_secs {
            Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), pending).await {
                Ok(output) => output?,
                Err(_) => {
                    if let Some(pid) = pid {
                        kill_process_group(pid);
                    }
                    return Err(ExecutorError::Timeout(command.to_string(), secs));
                }
            },
            None => pending.await?,
        };

        Ok(finish(command, output, start, options))
    }
}

/// Read a pipe to completion on a helper thread
fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(e) = pipe.read_to_end(&mut buf) {
            warn!(error = %e, bytes = buf.len(), "failed to read command output");
        }
        buf
    })
}

/// Wait for the child, killing it once `limit` elapses
///
/// Returns `None` when the child was killed.
fn wait_with_deadline(child: &mut Child, limit: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= limit {
            kill_process_group(child.id());
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// SIGKILL the process group led by `pid`
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: kill(2) takes plain integers and touches no memory
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc != 0 {
        debug!(pgid, error = %std::io::Error::last_os_error(), "process group already gone");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

fn finish(command: &str, output: Output, start: Instant, options: &ExecOptions) -> ExecOutput {
    let duration_ms = start.elapsed().as_millis() as u64;
    let code = output.status.code().unwrap_or(-1);

    let result = ExecOutput::new(
        code,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );

    if !options.silent {
        echo(&result);
    }

    info!(
        command = %command.chars().take(100).collect::<String>(),
        duration_ms = duration_ms,
        exit_code = code,
        output_bytes = result.stdout.len() + result.stderr.len(),
        "command executed"
    );

    result
}

fn echo(output: &ExecOutput) {
    if !output.stdout.is_empty() {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(output.stdout.as_bytes());
        let _ = out.flush();
    }
    if !output.stderr.is_empty() {
        let mut err = std::io::stderr().lock();
        let _ = err.write_all(output.stderr.as_bytes());
        let _ = err.flush();
    }
}
