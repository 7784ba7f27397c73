// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitsig-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitsig [global options] <command>
//! version
//! options
//! inis
//! commit <REV> [--details]
//! tag <REV> [--details]
//! show <REV>
//! ```

pub mod global;
pub mod sig;


use crate::cli::global::GlobalOptions;
use crate::cli::sig::{RevArgs, SigArgs};
use clap::{Parser, Subcommand};

/// Git signature status classifier
///
/// Reports whether a commit and its annotated tags carry good GPG signatures.
#[derive(Debug, Parser)]
#[command(
    name = "gitsig",
    author,
    version,
    about = "Git signature status classifier",
    long_about = "gitsig-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Classifies the GPG signature of a commit and of the annotated\n\
                  tags pointing at it.\n\n\
                  `gitsig commit HEAD` reports the commit signature, `gitsig tag v1.0`\n\
                  the tag signature, `gitsig show v1.0` both. See\n\
                  `gitsig <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  gitsig reads `gitsig.toml` from the current directory if it\n\
                  exists. Files given with --ini are loaded before it, in order.\n\
                  GITSIG_<SECTION>__<KEY> environment variables and --set\n\
                  override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used by gitsig.
    Inis,

    /// Shows the signature status of a commit.
    Commit(SigArgs),

    /// Shows the signature status of the annotated tag on a commit.
    Tag(SigArgs),

    /// Shows commit and tag status together with git's verification output.
    Show(RevArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
