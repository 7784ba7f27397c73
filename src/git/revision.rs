// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A commit together with the refs that point at it.

use serde::Serialize;

use super::refs::GitRef;

/// A resolved commit and its refs, in the order git listed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitRevision {
    object_id: String,
    refs: Vec<GitRef>,
}

impl GitRevision {
    pub fn new(object_id: impl Into<String>, refs: Vec<GitRef>) -> Self {
        Self {
            object_id: object_id.into(),
            refs,
        }
    }

    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    #[must_use]
    pub fn refs(&self) -> &[GitRef] {
        &self.refs
    }

    /// Peeled annotated tags under `refs/tags/` pointing at this commit.
    pub fn dereferenced_tags(&self) -> impl Iterator<Item = &GitRef> {
        self.refs
            .iter()
            .filter(|r| r.is_tag() && r.is_dereferenced())
    }
}
