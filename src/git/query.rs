// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Revision loading.
//!
//! ```text
//! "v1.0" ── rev-parse --verify --quiet v1.0^{commit} ──> <oid>
//!        ── show-ref --dereference ──────────────────> all refs
//!                                                        |
//!                        refs_pointing_at(<oid>) <───────'
//!                                 |
//!                                 v
//!                      GitRevision { oid, refs }
//! ```

use tracing::debug;

use super::backend::GitRunner;
use super::refs::{parse_show_ref, refs_pointing_at};
use super::revision::GitRevision;
use crate::error::{GitError, SigError, SigResult};

/// Resolves `rev` to a commit and collects the refs pointing at it.
///
/// # Errors
///
/// `InvalidArgument` for an empty revision or one that looks like an option;
/// `RevisionNotFound` if git cannot resolve it to a commit; `CommandFailed`
/// if the refs cannot be listed.
pub async fn load_revision<R: GitRunner>(runner: &R, rev: &str) -> SigResult<GitRevision> {
    if rev.is_empty() || rev.starts_with('-') {
        return Err(SigError::InvalidArgument(
            format!("'{rev}' is not a revision").into_boxed_str(),
        ));
    }

    let peeled = format!("{rev}^{{commit}}");
    let output = runner
        .run_git(&["rev-parse", "--verify", "--quiet", &peeled])
        .await?;
    let object_id = output.stdout().trim();
    if !output.success() || object_id.is_empty() {
        return Err(GitError::RevisionNotFound {
            revision: rev.to_string(),
        }
        .into());
    }
    let object_id = object_id.to_string();

    // Exit code 1 only means the repository has no refs.
    let output = runner.run_git(&["show-ref", "--dereference"]).await?;
    if !matches!(output.exit_code(), 0 | 1) {
        return Err(GitError::CommandFailed {
            command: "git show-ref --dereference".to_string(),
            message: output.stderr().trim().to_string(),
        }
        .into());
    }

    let refs = refs_pointing_at(parse_show_ref(output.stdout()), &object_id);
    debug!(revision = rev, commit = %object_id, refs = refs.len(), "revision loaded");
    Ok(GitRevision::new(object_id, refs))
}
