// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Classification rules for git's signature output.
//!
//! Every string pattern matched against git or GnuPG output lives here. If
//! git changes its wording, this is the only file to touch.
//!
//! ```text
//! %G? code ──> CommitStatus::from_code
//!   G            GoodSignature
//!   B U X Y R    SignatureError
//!   E            MissingPublicKey
//!   N / other    NoSignature
//!
//! verify-tag --raw stderr ──> TagStatus::from_verify_output
//!   GOODSIG + VALIDSIG          OneGood
//!   error: no signature found   TagNotSigned
//!   NO_PUBKEY                   NoPubKey
//!   anything else               Unknown
//! ```

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

pub const GOOD_SIGNATURE: &str = "GOODSIG";
pub const VALID_SIGNATURE: &str = "VALIDSIG";
pub const NO_SIGNATURE_FOUND: &str = "error: no signature found";
pub const NO_PUBLIC_KEY: &str = "NO_PUBKEY";

/// `[GNUPG:] KEYWORD args...`
static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[GNUPG:\]\s+([A-Z_]+)(?:\s+(.*))?$").expect("status line regex is valid")
});

/// Verification outcome of a single commit's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitStatus {
    GoodSignature,
    SignatureError,
    MissingPublicKey,
    NoSignature,
}

impl CommitStatus {
    /// Classify the output of `--pretty=format:%G?`.
    ///
    /// Only the first character counts. Empty or unrecognised input is
    /// `NoSignature`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('G') => Self::GoodSignature,
            Some('B' | 'U' | 'X' | 'Y' | 'R') => Self::SignatureError,
            Some('E') => Self::MissingPublicKey,
            _ => Self::NoSignature,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoodSignature => "good signature",
            Self::SignatureError => "signature error",
            Self::MissingPublicKey => "missing public key",
            Self::NoSignature => "no signature",
        }
    }
}

impl fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification outcome for the annotated tags on a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    /// No annotated tag points at the commit.
    NoTag,
    /// Exactly one tag with a good, valid signature.
    OneGood,
    /// Exactly one tag and it carries no signature.
    TagNotSigned,
    /// Exactly one tag, signed by a key missing from the keyring.
    NoPubKey,
    /// More than one annotated tag; nothing was verified.
    Many,
    /// Exactly one tag, verification output matched no known pattern.
    Unknown,
}

impl TagStatus {
    /// Classify the stderr of `git verify-tag --raw <tag>`.
    #[must_use]
    pub fn from_verify_output(stderr: &str) -> Self {
        if stderr.contains(GOOD_SIGNATURE) && stderr.contains(VALID_SIGNATURE) {
            Self::OneGood
        } else if stderr.contains(NO_SIGNATURE_FOUND) {
            Self::TagNotSigned
        } else if stderr.contains(NO_PUBLIC_KEY) {
            Self::NoPubKey
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoTag => "no tag",
            Self::OneGood => "good signature",
            Self::TagNotSigned => "tag not signed",
            Self::NoPubKey => "missing public key",
            Self::Many => "multiple tags",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `[GNUPG:]` status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub keyword: &'a str,
    pub args: &'a str,
}

/// Extracts `[GNUPG:]` status lines, skipping everything else.
pub fn parse_status_lines(output: &str) -> impl Iterator<Item = StatusLine<'_>> {
    output.lines().filter_map(|line| {
        let caps = STATUS_LINE.captures(line.trim_end_matches('\r'))?;
        Some(StatusLine {
            keyword: caps.get(1)?.as_str(),
            args: caps.get(2).map_or("", |m| m.as_str()),
        })
    })
}

/// Who signed, as reported by GnuPG.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignerInfo {
    /// Long key id from the `*SIG` line.
    pub key_id: Option<String>,
    /// User id (`Name <email>`) from the `*SIG` line.
    pub user_id: Option<String>,
    /// Primary key fingerprint from `VALIDSIG`.
    pub fingerprint: Option<String>,
}

/// Reads signer details from `verify-tag --raw` / `verify-commit --raw` output.
///
/// Returns `None` when no signature line is present.
#[must_use]
pub fn signer_from_status(output: &str) -> Option<SignerInfo> {
    let mut signer: Option<SignerInfo> = None;

    for line in parse_status_lines(output) {
        match line.keyword {
            "GOODSIG" | "BADSIG" | "EXPSIG" | "EXPKEYSIG" | "REVKEYSIG" => {
                let (key_id, user_id) = line
                    .args
                    .split_once(' ')
                    .map_or((line.args, ""), |(k, u)| (k, u.trim()));
                let entry = signer.get_or_insert_with(SignerInfo::default);
                entry.key_id = non_empty(key_id);
                entry.user_id = non_empty(user_id);
            }
            "ERRSIG" => {
                let entry = signer.get_or_insert_with(SignerInfo::default);
                entry.key_id = line.args.split_whitespace().next().and_then(non_empty);
            }
            "VALIDSIG" => {
                // The primary key fingerprint is the last field.
                let entry = signer.get_or_insert_with(SignerInfo::default);
                entry.fingerprint = line.args.split_whitespace().last().and_then(non_empty);
            }
            _ => {}
        }
    }

    signer
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
