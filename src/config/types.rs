// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitsig-rs.
//!
//! ```text
//! Config: GlobalConfig, GitConfig
//! GitConfig.config: extra `git -c key=value` pairs (gpg.program, ...)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogLevel;
use crate::utility::encoding::OutputEncoding;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6, default 2).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6, default 5).
    pub file_log_level: LogLevel,
    /// Path to log file. No file log when unset or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the file log as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::default(),
            file_log_level: LogLevel::TRACE,
            log_file: None,
            json_log: false,
        }
    }
}

impl GlobalConfig {
    /// Log file path, treating an empty path as unset.
    #[must_use]
    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// How git is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable, a name resolved via PATH or an explicit path.
    pub executable: PathBuf,
    /// Per-invocation timeout in seconds, 0 disables it.
    pub timeout_secs: u64,
    /// Encoding of git's output (matches `i18n.logOutputEncoding`).
    pub output_encoding: OutputEncoding,
    /// Extra configuration passed as `git -c key=value`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("git"),
            timeout_secs: 30,
            output_encoding: OutputEncoding::default(),
            config: BTreeMap::new(),
        }
    }
}

impl GitConfig {
    /// Timeout as a `Duration`, `None` when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}
