//! Subprocess-backed SQL client.
//!
//! Invokes `<command> [args...] <database>`, writes the script to the
//! child's stdin, closes it, and waits for the child to exit. There is no
//! timeout: a client that never exits blocks the caller.

use crate::error::{DbError, DbResult};
use crate::traits::SqlClient;
use async_trait::async_trait;
use dc_core::env::Credential;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Command-line database client
#[derive(Debug, Clone)]
pub struct CommandClient {
    command: String,
    args: Vec<String>,
    database: String,
    credential: Option<Credential>,
}

impl CommandClient {
    /// Create a client for `database` using the `command` executable
    pub fn new(command: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            database: database.into(),
            credential: None,
        }
    }

    /// Extra arguments placed before the database name
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Environment variable handed to the client process only
    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    fn build_command(&self, capture_stdout: bool) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(&self.database)
            .stdin(Stdio::piped())
            .stdout(if capture_stdout {
                Stdio::piped()
            } else {
                Stdio::inherit()
            })
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(credential) = &self.credential {
            cmd.env(&credential.name, &credential.value);
        }
        cmd
    }

    /// Spawn the client, feed it `sql` and collect its output.
    async fn run(&self, sql: &str, capture_stdout: bool) -> DbResult<String> {
        log::debug!("Running {} ({} bytes of SQL)", self.describe(), sql.len());

        let mut child = self
            .build_command(capture_stdout)
            .spawn()
            .map_err(|e| DbError::SpawnFailed {
                command: self.command.clone(),
                source: e,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            DbError::Io(std::io::Error::other("client stdin was not captured"))
        })?;
        let script = sql.as_bytes().to_vec();
        let feed = async move {
            stdin.write_all(&script).await?;
            stdin.shutdown().await
        };

        // Feed stdin while draining stdout/stderr so neither side can block
        // on a full pipe.
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        if let Err(e) = fed {
            // A client that exits without reading all input is judged by its
            // exit status alone.
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(DbError::Io(e));
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(DbError::ExecutionFailed {
                command: self.command.clone(),
                status: describe_status(output.status),
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            log::warn!("{}: {}", self.command, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

#[async_trait]
impl SqlClient for CommandClient {
    async fn execute(&self, sql: &str) -> DbResult<()> {
        self.run(sql, false).await.map(|_| ())
    }

    async fn query(&self, sql: &str) -> DbResult<String> {
        self.run(sql, true).await
    }

    fn describe(&self) -> String {
        let mut parts = vec![self.command.clone()];
        parts.extend(self.args.iter().cloned());
        parts.push(self.database.clone());
        parts.join(" ")
    }
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
