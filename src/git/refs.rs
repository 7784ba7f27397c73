// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reference model.
//!
//! ```text
//! git show-ref --dereference
//!   <oid> refs/heads/main
//!   <oid> refs/tags/v1.0          (tag object)
//!   <oid> refs/tags/v1.0^{}       (peeled: the commit)
//!        |
//!        v
//!   GitRef { object_id, name }
//! ```

use serde::Serialize;

/// Suffix git appends to a peeled (dereferenced) annotated tag.
pub const DEREFERENCE_SUFFIX: &str = "^{}";

const TAG_PREFIX: &str = "refs/tags/";
const HEAD_PREFIX: &str = "refs/heads/";
const REMOTE_PREFIX: &str = "refs/remotes/";

/// A named reference and the object it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitRef {
    object_id: String,
    name: String,
}

impl GitRef {
    pub fn new(object_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            name: name.into(),
        }
    }

    /// Object id this ref resolves to.
    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Fully-qualified name, e.g. `refs/tags/v1.0^{}`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for a peeled annotated tag (`^{}` suffix).
    #[must_use]
    pub fn is_dereferenced(&self) -> bool {
        self.name.ends_with(DEREFERENCE_SUFFIX)
    }

    #[must_use]
    pub fn is_tag(&self) -> bool {
        self.name.starts_with(TAG_PREFIX)
    }

    /// Short name without the `refs/...` namespace or the `^{}` suffix.
    ///
    /// `refs/tags/v1.0^{}` → `v1.0`, `refs/remotes/origin/main` → `origin/main`.
    #[must_use]
    pub fn local_name(&self) -> &str {
        let name = self
            .name
            .strip_suffix(DEREFERENCE_SUFFIX)
            .unwrap_or(&self.name);
        [TAG_PREFIX, HEAD_PREFIX, REMOTE_PREFIX]
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix))
            .unwrap_or(name)
    }
}

/// Parses `git show-ref --dereference` output.
///
/// Lines that do not look like `<oid> <name>` are skipped.
#[must_use]
pub fn parse_show_ref(output: &str) -> Vec<GitRef> {
    output
        .lines()
        .filter_map(|line| {
            let (oid, name) = line.trim_end_matches('\r').split_once(' ')?;
            let name = name.trim();
            if oid.is_empty() || name.is_empty() || !oid.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            Some(GitRef::new(oid, name))
        })
        .collect()
}

/// Keeps the refs resolving to `object_id`, in input order.
#[must_use]
pub fn refs_pointing_at(refs: Vec<GitRef>, object_id: &str) -> Vec<GitRef> {
    refs.into_iter()
        .filter(|r| r.object_id().eq_ignore_ascii_case(object_id))
        .collect()
}
