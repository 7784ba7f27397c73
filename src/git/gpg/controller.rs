// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Signature queries for one revision.
//!
//! ```text
//! GpgController::new() ── bind(runner) ──> bound
//!        |
//!        +-- commit_signature_status      log -1 --no-show-signature --pretty=format:%G? <oid>
//!        +-- commit_verification_message  log -1 --no-show-signature --pretty=format:%GG <oid>
//!        +-- tag_status                   0 tags: NoTag, >1: Many (no git),
//!        |                                1 tag: verify-tag --raw <tag>
//!        +-- tag_verify_message           one verify-tag per tag, in ref order
//! ```

use std::sync::OnceLock;
use tracing::debug;

use super::parse::{CommitStatus, TagStatus};
use crate::error::{GitError, SigResult, invalid_argument};
use crate::git::backend::GitRunner;
use crate::git::refs::GitRef;
use crate::git::revision::GitRevision;

const LINE_BREAK: &str = "\r\n";

/// Signature status queries against a lazily bound repository runner.
#[derive(Debug)]
pub struct GpgController<R> {
    runner: OnceLock<R>,
}

impl<R> Default for GpgController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> GpgController<R> {
    /// Creates an unbound controller; call [`GpgController::bind`] before use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runner: OnceLock::new(),
        }
    }

    /// Creates a controller already bound to `runner`.
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner: OnceLock::from(runner),
        }
    }

    /// Binds the repository runner. A controller binds at most once.
    ///
    /// # Errors
    ///
    /// Returns the runner back if the controller is already bound.
    pub fn bind(&self, runner: R) -> Result<(), R> {
        self.runner.set(runner)
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.runner.get().is_some()
    }

    fn runner(&self) -> SigResult<&R> {
        self.runner.get().ok_or_else(|| GitError::NotBound.into())
    }
}

impl<R: GitRunner> GpgController<R> {
    /// Signature status of the revision's commit.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `revision` is `None`; `NotBound` before
    /// [`GpgController::bind`]; otherwise whatever the runner reports.
    pub async fn commit_signature_status(
        &self,
        revision: Option<&GitRevision>,
    ) -> SigResult<CommitStatus> {
        let revision = revision.ok_or_else(|| invalid_argument("revision"))?;
        let output = self
            .runner()?
            .run_git(&[
                "log",
                "-1",
                "--no-show-signature",
                "--pretty=format:%G?",
                revision.object_id(),
            ])
            .await?;

        let status = CommitStatus::from_code(output.stdout());
        debug!(commit = %revision.object_id(), status = ?status, "commit signature");
        Ok(status)
    }

    /// Git's own verification text for the revision's commit, unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`GpgController::commit_signature_status`].
    pub async fn commit_verification_message(
        &self,
        revision: Option<&GitRevision>,
    ) -> SigResult<String> {
        let revision = revision.ok_or_else(|| invalid_argument("revision"))?;
        let output = self
            .runner()?
            .run_git(&[
                "log",
                "-1",
                "--no-show-signature",
                "--pretty=format:%GG",
                revision.object_id(),
            ])
            .await?;
        Ok(output.into_stdout())
    }

    /// Signature status of the annotated tag on the revision.
    ///
    /// Verification only runs when exactly one dereferenced tag points at the
    /// commit; several tags are reported as `Many` without invoking git.
    ///
    /// # Errors
    ///
    /// Same as [`GpgController::commit_signature_status`].
    pub async fn tag_status(&self, revision: Option<&GitRevision>) -> SigResult<TagStatus> {
        let revision = revision.ok_or_else(|| invalid_argument("revision"))?;
        let tags: Vec<&GitRef> = revision.dereferenced_tags().collect();

        let status = match tags.as_slice() {
            [] => TagStatus::NoTag,
            [tag] => TagStatus::from_verify_output(&self.verify_tag(tag).await?),
            _ => TagStatus::Many,
        };

        debug!(
            commit = %revision.object_id(),
            tags = tags.len(),
            status = ?status,
            "tag signature"
        );
        Ok(status)
    }

    /// Raw `verify-tag` output for the revision's annotated tags.
    ///
    /// One tag yields its output as-is. Several tags are verified one after
    /// another in ref order, each rendered as `name CRLF output CRLF CRLF`.
    ///
    /// # Errors
    ///
    /// Same as [`GpgController::commit_signature_status`].
    pub async fn tag_verify_message(&self, revision: Option<&GitRevision>) -> SigResult<String> {
        let revision = revision.ok_or_else(|| invalid_argument("revision"))?;
        let tags: Vec<&GitRef> = revision.dereferenced_tags().collect();

        match tags.as_slice() {
            [] => Ok(String::new()),
            [tag] => self.verify_tag(tag).await,
            _ => {
                let mut message = String::new();
                for tag in tags {
                    let output = self.verify_tag(tag).await?;
                    message.push_str(tag.local_name());
                    message.push_str(LINE_BREAK);
                    message.push_str(&output);
                    message.push_str(LINE_BREAK);
                    message.push_str(LINE_BREAK);
                }
                Ok(message)
            }
        }
    }

    /// Stderr of `git verify-tag --raw <tag>`.
    async fn verify_tag(&self, tag: &GitRef) -> SigResult<String> {
        let output = self
            .runner()?
            .run_git(&["verify-tag", "--raw", tag.local_name()])
            .await?;
        Ok(output.into_stderr())
    }
}
