// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (read_to_end, raw bytes)
//!   select: wait | cancel | timeout
//!   cancel or timeout: kill, drop the readers
//!   decode with OutputEncoding, trace non-empty streams
//!   --> ProcessOutput { stdout, stderr, exit_code, interrupted }
//! ```
//!
//! Streams are captured whole. Line endings and trailing newlines are kept
//! exactly as the child wrote them.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::{ProcessError, SigResult};
use crate::utility::encoding::OutputEncoding;

type ReaderHandle = JoinHandle<std::io::Result<Vec<u8>>>;

/// Spawns a task draining `stream` to its end.
fn spawn_reader<R>(stream: Option<R>) -> Option<ReaderHandle>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    stream.map(|mut stream| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).await?;
            Ok(buf)
        })
    })
}

/// Waits for a reader task and decodes what it collected.
async fn collect_output(
    handle: Option<ReaderHandle>,
    encoding: OutputEncoding,
    process_name: &str,
    stream_name: &str,
    command: &str,
) -> SigResult<String> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };

    let output_error = |message: String| ProcessError::OutputError {
        command: command.to_string(),
        message,
    };
    let bytes = handle
        .await
        .map_err(|e| output_error(e.to_string()))?
        .map_err(|e| output_error(e.to_string()))?;

    let text = encoding.decode(&bytes).into_owned();
    if !text.is_empty() {
        trace!(process = %process_name, stream = %stream_name, output = %text, "output");
    }
    Ok(text)
}

fn abort_readers(handles: [Option<ReaderHandle>; 2]) {
    for handle in handles.into_iter().flatten() {
        handle.abort();
    }
}

/// Resolves after `duration`, or never without one.
async fn expired(duration: Option<Duration>) {
    match duration {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

impl ProcessBuilder {
    /// Runs the child process, capturing output and waiting for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        command: &str,
        child: &mut Child,
        token: &CancellationToken,
    ) -> SigResult<ProcessOutput> {
        let stdout_handle = spawn_reader(child.stdout.take());
        let stderr_handle = spawn_reader(child.stderr.take());

        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "cancellation requested, terminating process");
                child.kill().await.ok();
                (child.wait().await?, true)
            }
            () = expired(self.timeout_duration()) => {
                let timeout = self.timeout_duration().unwrap_or_default();
                warn!(process = %name, timeout = ?timeout, "process timed out");
                child.kill().await.ok();
                child.wait().await?;
                abort_readers([stdout_handle, stderr_handle]);
                return Err(ProcessError::Timeout {
                    command: command.to_string(),
                    timeout_secs: timeout.as_secs(),
                }
                .into());
            }
        };

        // Grandchildren may still hold the pipes open after a kill.
        if interrupted {
            abort_readers([stdout_handle, stderr_handle]);
            return Ok(ProcessOutput::new(
                exit_status.code().unwrap_or(-1),
                String::new(),
                String::new(),
                true,
            ));
        }

        let encoding = self.output_encoding();
        let stdout = collect_output(stdout_handle, encoding, name, "stdout", command).await?;
        let stderr = collect_output(stderr_handle, encoding, name, "stderr", command).await?;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            stdout,
            stderr,
            false,
        ))
    }
}
