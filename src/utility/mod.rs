// gitsig-rs: Git signature status classifier
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   OutputEncoding   WHATWG label --> encoding_rs decoder
//!   decode()         raw process bytes --> UTF-8 (lossy)
//! ```

pub mod encoding;
