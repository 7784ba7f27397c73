// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitsig-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. --ini files (in order)
//! 3. local gitsig.toml (cwd)
//! 4. GITSIG_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITSIG_GIT__TIMEOUT_SECS=5          → git.timeout_secs = 5
//! GITSIG_GLOBAL__OUTPUT_LOG_LEVEL=4   → global.output_log_level = 4
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git invocation options.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitsig_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("gitsig.toml")
    ///     .with_env_prefix("GITSIG")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an empty git executable or a `-c` key
    /// without a section.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.git.executable.as_os_str().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "git".to_string(),
                key: "executable".to_string(),
            });
        }
        if let Some(key) = self.git.config.keys().find(|k| !k.contains('.')) {
            return Err(ConfigError::InvalidValue {
                section: "git.config".to_string(),
                key: key.clone(),
                message: "git config keys must look like 'section.name'".to_string(),
            });
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global
                .log_file()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.json_log".to_string(),
            self.global.json_log.to_string(),
        );
        options.insert(
            "git.executable".to_string(),
            self.git.executable.display().to_string(),
        );
        options.insert(
            "git.timeout_secs".to_string(),
            self.git.timeout_secs.to_string(),
        );
        options.insert(
            "git.output_encoding".to_string(),
            self.git.output_encoding.to_string(),
        );
        for (key, value) in &self.git.config {
            options.insert(format!("git.config.{key}"), value.clone());
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
