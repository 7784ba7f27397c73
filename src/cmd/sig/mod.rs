// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Signature commands: `commit`, `tag` and `show`.
//!
//! ```text
//! REV --> load_revision --> GpgController --> CommitReport / TagReport
//!                                                   |
//!                                     text (render) or JSON (serde_json)
//! ```
//!
//! # Key Types
//!
//! | Type           | Purpose                                  |
//! |----------------|------------------------------------------|
//! | `CommitReport` | Commit status and optional `%GG` text    |
//! | `TagReport`    | Tag status, tag names, signer, raw text  |
//! | `ShowReport`   | Both reports for one revision            |

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::sig::{RevArgs, SigArgs};
use crate::config::Config;
use crate::error::{Result, SigResult};
use crate::git::backend::{GitRunner, ShellBackend};
use crate::git::gpg::{CommitStatus, GpgController, SignerInfo, TagStatus, signer_from_status};
use crate::git::query::load_revision;
use crate::git::revision::GitRevision;

/// Commit signature result.
#[derive(Debug, Clone, Serialize)]
pub struct CommitReport {
    /// Revision as given on the command line.
    pub revision: String,
    pub commit: String,
    pub status: CommitStatus,
    /// Git's `%GG` verification text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Annotated tag signature result.
#[derive(Debug, Clone, Serialize)]
pub struct TagReport {
    pub revision: String,
    pub commit: String,
    /// Annotated tags pointing at the commit, in ref order.
    pub tags: Vec<String>,
    pub status: TagStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<SignerInfo>,
    /// Raw `verify-tag` output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Commit and tag results for one revision.
#[derive(Debug, Clone, Serialize)]
pub struct ShowReport {
    pub commit: CommitReport,
    pub tag: TagReport,
}

impl CommitReport {
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = format!("commit {} ({}): {}\n", self.commit, self.revision, self.status);
        append_message(&mut out, self.message.as_deref());
        out
    }
}

impl TagReport {
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = format!("tag {} ({}): {}\n", self.commit, self.revision, self.status);
        if !self.tags.is_empty() {
            let _ = writeln!(out, "  tags: {}", self.tags.join(", "));
        }
        if let Some(signer) = &self.signer {
            let _ = writeln!(
                out,
                "  signer: {} [{}]",
                signer.user_id.as_deref().unwrap_or("<unknown>"),
                signer
                    .fingerprint
                    .as_deref()
                    .or(signer.key_id.as_deref())
                    .unwrap_or("?")
            );
        }
        append_message(&mut out, self.message.as_deref());
        out
    }
}

impl ShowReport {
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = self.commit.render_text();
        out.push_str(&self.tag.render_text());
        out
    }
}

/// Appends git's text with every line indented, keeping it otherwise intact.
fn append_message(out: &mut String, message: Option<&str>) {
    let Some(message) = message.filter(|m| !m.trim().is_empty()) else {
        return;
    };
    for line in message.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
}

/// Builds the commit report, running the `%GG` query only for `details`.
///
/// # Errors
///
/// Propagates any error from the controller.
pub async fn commit_report<R: GitRunner>(
    controller: &GpgController<R>,
    revision: &GitRevision,
    input: &str,
    details: bool,
) -> SigResult<CommitReport> {
    let status = controller.commit_signature_status(Some(revision)).await?;
    let message = if details {
        Some(controller.commit_verification_message(Some(revision)).await?)
    } else {
        None
    };

    Ok(CommitReport {
        revision: input.to_string(),
        commit: revision.object_id().to_string(),
        status,
        message,
    })
}

/// Builds the tag report. Signer details are only read for a single tag.
///
/// # Errors
///
/// Propagates any error from the controller.
pub async fn tag_report<R: GitRunner>(
    controller: &GpgController<R>,
    revision: &GitRevision,
    input: &str,
    details: bool,
) -> SigResult<TagReport> {
    let status = controller.tag_status(Some(revision)).await?;
    let tags: Vec<String> = revision
        .dereferenced_tags()
        .map(|t| t.local_name().to_string())
        .collect();

    let message = if details {
        Some(controller.tag_verify_message(Some(revision)).await?)
    } else {
        None
    };
    let signer = match (&message, tags.len()) {
        (Some(text), 1) => signer_from_status(text),
        _ => None,
    };

    Ok(TagReport {
        revision: input.to_string(),
        commit: revision.object_id().to_string(),
        tags,
        status,
        signer,
        message,
    })
}

/// Run the commit command.
///
/// # Errors
///
/// Returns an error if the revision cannot be resolved or git fails to run.
pub async fn run_commit_command(
    args: &SigArgs,
    config: &Config,
    repo: &Path,
    json: bool,
) -> Result<()> {
    let (controller, revision) = prepare(config, repo, &args.rev.revision).await?;
    let report = commit_report(&controller, &revision, &args.rev.revision, args.details).await?;
    info!(commit = %report.commit, status = %report.status, "commit classified");
    emit(&report, json, CommitReport::render_text)
}

/// Run the tag command.
///
/// # Errors
///
/// Returns an error if the revision cannot be resolved or git fails to run.
pub async fn run_tag_command(args: &SigArgs, config: &Config, repo: &Path, json: bool) -> Result<()> {
    let (controller, revision) = prepare(config, repo, &args.rev.revision).await?;
    let report = tag_report(&controller, &revision, &args.rev.revision, args.details).await?;
    info!(commit = %report.commit, status = %report.status, "tag classified");
    emit(&report, json, TagReport::render_text)
}

/// Run the show command (both statuses, both messages).
///
/// # Errors
///
/// Returns an error if the revision cannot be resolved or git fails to run.
pub async fn run_show_command(args: &RevArgs, config: &Config, repo: &Path, json: bool) -> Result<()> {
    let (controller, revision) = prepare(config, repo, &args.revision).await?;
    let report = ShowReport {
        commit: commit_report(&controller, &revision, &args.revision, true).await?,
        tag: tag_report(&controller, &revision, &args.revision, true).await?,
    };
    emit(&report, json, ShowReport::render_text)
}

async fn prepare(
    config: &Config,
    repo: &Path,
    rev: &str,
) -> Result<(GpgController<ShellBackend>, GitRevision)> {
    let backend = ShellBackend::from_config(&config.git, repo);
    cancel_on_ctrl_c(backend.cancellation());

    let revision = load_revision(&backend, rev).await?;
    Ok((GpgController::with_runner(backend), revision))
}

fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting git...");
            token.cancel();
        }
    });
}

fn emit<T: Serialize>(report: &T, json: bool, render: impl Fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render(report));
    }
    Ok(())
}
