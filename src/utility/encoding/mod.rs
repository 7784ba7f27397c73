// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of captured git output.
//!
//! ```text
//! git stdout/stderr bytes --(decode)--> UTF-8 String
//!        i18n.logOutputEncoding ~ OutputEncoding
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences → U+FFFD. No BOM sniffing: a BOM in
//! the middle of a commit message must not switch decoders.

use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Character encoding of text produced by a git process.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OutputEncoding(&'static Encoding);

impl Default for OutputEncoding {
    fn default() -> Self {
        Self::UTF8
    }
}

impl OutputEncoding {
    pub const UTF8: Self = Self(UTF_8);

    /// Look up an encoding by WHATWG label (`utf-8`, `latin1`, `windows-1252`, ...).
    #[must_use]
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self)
    }

    /// Canonical encoding name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decode raw bytes into UTF-8.
    ///
    /// # Example
    /// ```
    /// use gitsig_rs::utility::encoding::OutputEncoding;
    ///
    /// let latin1 = OutputEncoding::for_label("windows-1252").unwrap();
    /// assert_eq!(latin1.decode(b"caf\xe9"), "café");
    /// ```
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        if self.0 == UTF_8 {
            return String::from_utf8_lossy(bytes);
        }
        let (text, _had_errors) = self.0.decode_without_bom_handling(bytes);
        text
    }
}

impl fmt::Debug for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_label(s).ok_or_else(|| ConfigError::InvalidValue {
            section: "git".to_string(),
            key: "output_encoding".to_string(),
            message: format!("unknown encoding label '{s}'"),
        })
    }
}

impl Serialize for OutputEncoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for OutputEncoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
