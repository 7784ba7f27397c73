// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git invocation abstraction.
//!
//! ```text
//! GitRunner (trait)  --> ShellBackend (git CLI via ProcessBuilder)
//!                    --> test doubles (canned stdout/stderr)
//! ```
//!
//! A runner only captures text. Exit codes are reported, never judged:
//! callers decide whether a non-zero exit matters.

use bon::Builder;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::types::GitConfig;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::error::{GitError, SigResult};
use crate::utility::encoding::OutputEncoding;

/// Captured result of a finished git process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl GitOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub fn into_stdout(self) -> String {
        self.stdout
    }

    #[must_use]
    pub fn into_stderr(self) -> String {
        self.stderr
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<ProcessOutput> for GitOutput {
    fn from(output: ProcessOutput) -> Self {
        let exit_code = output.exit_code();
        let (stdout, stderr) = output.into_streams();
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }
}

/// Runs git subcommands against one repository.
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` and capture both streams.
    ///
    /// # Errors
    ///
    /// Returns an error only if git could not be run to completion (missing
    /// executable, spawn failure, timeout, cancellation). A non-zero exit is
    /// not an error.
    fn run_git(&self, args: &[&str]) -> impl Future<Output = SigResult<GitOutput>> + Send;
}

/// Git CLI backend.
///
/// Always sets `GCM_INTERACTIVE=never`, `GIT_TERMINAL_PROMPT=0` and
/// `LC_ALL=C`; the parsers depend on git's untranslated messages.
#[derive(Debug, Clone, Builder)]
pub struct ShellBackend {
    /// Repository working directory.
    #[builder(into)]
    repo_path: PathBuf,
    #[builder(into, default = PathBuf::from("git"))]
    executable: PathBuf,
    timeout: Option<Duration>,
    #[builder(default)]
    encoding: OutputEncoding,
    /// Passed as `-c key=value` before the subcommand.
    #[builder(default)]
    config: BTreeMap<String, String>,
    #[builder(default)]
    cancellation: CancellationToken,
}

impl ShellBackend {
    /// Backend for `repo_path` using the `[git]` configuration section.
    pub fn from_config(config: &GitConfig, repo_path: impl Into<PathBuf>) -> Self {
        Self::builder()
            .repo_path(repo_path)
            .executable(config.executable.clone())
            .maybe_timeout(config.timeout())
            .encoding(config.output_encoding)
            .config(config.config.clone())
            .build()
    }

    /// Token that aborts any in-flight git process when cancelled.
    #[must_use]
    pub fn cancellation(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    #[must_use]
    pub const fn repo_path(&self) -> &PathBuf {
        &self.repo_path
    }

    fn command(&self, args: &[&str]) -> SigResult<ProcessBuilder> {
        let mut builder = ProcessBuilder::which(&self.executable)?
            .name("git")
            .cwd(&self.repo_path)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .encoding(self.encoding);

        for (key, value) in &self.config {
            builder = builder.arg("-c").arg(format!("{key}={value}"));
        }
        builder = builder.args(args);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }
}

impl GitRunner for ShellBackend {
    async fn run_git(&self, args: &[&str]) -> SigResult<GitOutput> {
        let output = self
            .command(args)?
            .run_with_cancellation(self.cancellation.clone())
            .await?;

        if output.is_interrupted() {
            return Err(GitError::Interrupted {
                command: format!("git {}", args.join(" ")),
            }
            .into());
        }
        Ok(output.into())
    }
}

#[cfg(test)]
mod tests;
