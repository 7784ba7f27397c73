// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Signature command arguments.

use clap::Args;

/// A revision to inspect.
#[derive(Debug, Clone, Args)]
pub struct RevArgs {
    /// Commit, branch or tag name (anything `git rev-parse` accepts).
    #[arg(value_name = "REV", default_value = "HEAD")]
    pub revision: String,
}

/// Arguments for the `commit` and `tag` commands.
#[derive(Debug, Clone, Args)]
pub struct SigArgs {
    #[command(flatten)]
    pub rev: RevArgs,

    /// Also print git's verification output.
    #[arg(short = 'd', long)]
    pub details: bool,
}
