// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git access and signature classification.
//!
//! ```text
//!            query::load_revision
//!                    |
//!                    v
//!   GitRevision { oid, refs: [GitRef] }
//!                    |
//!                    v
//!      gpg::GpgController<R: GitRunner>
//!         |                       |
//!         v                       v
//!   commit status / message   tag status / message
//!         \                       /
//!          v                     v
//!        ,-------------------------,
//!        | backend::GitRunner      |
//!        '--+-------------------+--'
//!           |                   |
//!           v                   v
//!      ShellBackend        test doubles
//!      (git CLI)
//! ```
//!
//! All classification strings live in [`gpg::parse`].

pub mod backend;
pub mod gpg;
pub mod query;
pub mod refs;
pub mod revision;
