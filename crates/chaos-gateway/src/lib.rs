//! Executes commands inside named lab containers and moves files in and
//! out of them. This is the only part of the system that shells out to
//! the container runtime; every other component goes through here.

use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::instrument;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("failed to invoke container runtime: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Clone)]
pub struct ContainerGateway {
    runtime_bin: String,
}

impl Default for ContainerGateway {
    fn default() -> Self {
        Self {
            runtime_bin: "docker".to_string(),
        }
    }
}

impl ContainerGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime_binary(runtime_bin: impl Into<String>) -> Self {
        Self {
            runtime_bin: runtime_bin.into(),
        }
    }

    /// Runs a shell command inside `container` and collects its output.
    #[instrument(skip(self, cmd), fields(container = %container))]
    pub async fn exec(&self, container: &str, cmd: &str) -> GatewayResult<ExecOutput> {
        let output = Command::new(&self.runtime_bin)
            .args(["exec", container, "/bin/bash", "-c", cmd])
            .output()
            .await
            .map_err(GatewayError::Io)?;
        Ok(self.to_exec_output(output, container))
    }

    /// Runs a vtysh/shell command with a tty allocated, mirroring the
    /// original orchestrator's `exec_run(cmd, tty=True)` for commands
    /// that require an interactive shell (the FRR reload pipeline).
    #[instrument(skip(self, cmd), fields(container = %container))]
    pub async fn exec_tty(&self, container: &str, cmd: &str) -> GatewayResult<ExecOutput> {
        let output = Command::new(&self.runtime_bin)
            .args(["exec", "-t", container, "/bin/bash", "-c", cmd])
            .output()
            .await
            .map_err(GatewayError::Io)?;
        Ok(self.to_exec_output(output, container))
    }

    /// Streams `script_body` into `container` on stdin and runs it with
    /// bash, in place of the original's write-tempfile/archive/copy-in
    /// pipeline, which exists only to work around the Python Docker
    /// SDK's API and adds no behavior of its own.
    #[instrument(skip(self, script_body), fields(container = %container))]
    pub async fn run_script(&self, container: &str, script_body: &str) -> GatewayResult<ExecOutput> {
        let mut child = Command::new(&self.runtime_bin)
            .args(["exec", "-i", container, "/bin/bash", "-s"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(script_body.as_bytes()).await?;
        }
        let output = child.wait_with_output().await?;
        Ok(self.to_exec_output(output, container))
    }

    /// Copies a single file out of `container` to `local_path`, the
    /// counterpart of the original's `container.get_archive` step when
    /// collecting a finished packet capture.
    #[instrument(skip(self), fields(container = %container))]
    pub async fn copy_out(
        &self,
        container: &str,
        container_path: &str,
        local_path: &std::path::Path,
    ) -> GatewayResult<()> {
        let status = Command::new(&self.runtime_bin)
            .arg("cp")
            .arg(format!("{container}:{container_path}"))
            .arg(local_path)
            .status()
            .await?;
        if !status.success() {
            return Err(GatewayError::ContainerNotFound(container.to_string()));
        }
        Ok(())
    }

    fn to_exec_output(&self, output: std::process::Output, container: &str) -> ExecOutput {
        let exit_code = output.status.code().unwrap_or(-1);
        if exit_code == 127 {
            tracing::warn!(%container, "container runtime reported no such container/command");
        }
        ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        }
    }
}
