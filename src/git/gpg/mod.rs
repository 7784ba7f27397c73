// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GPG signature classification for commits and annotated tags.
//!
//! [`parse`] holds every pattern matched against git's output;
//! [`controller`] decides which git commands run for a revision.

pub mod controller;
pub mod parse;

pub use controller::GpgController;
pub use parse::{CommitStatus, SignerInfo, TagStatus, signer_from_status};

#[cfg(test)]
mod tests;
