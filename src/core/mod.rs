// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!        core
//!          |
//!          v
//!       process
//!          |
//!   ProcessBuilder --> ProcessOutput
//!   which cache       exit code, stdout, stderr
//! ```

pub mod process;
