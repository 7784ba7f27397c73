// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and output capture.
//!
//! ```text
//! ProcessBuilder::which("git")
//!   .args() .cwd() .env() .encoding() .timeout()
//!   .run_with_cancellation(token)
//!       --> tokio::process::Command
//!           read stdout/stderr to end (bytes, no line splitting)
//!           timeout / CancellationToken --> kill
//!       --> ProcessOutput { exit_code, stdout, stderr, interrupted }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
