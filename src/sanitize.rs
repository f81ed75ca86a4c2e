// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Free-text sanitizer.
//!
//! Strips angle brackets and neutralizes `javascript:` / `data:` URI
//! schemes before the text reaches email templates. Scheme removal runs
//! to a fixpoint so that re-sanitizing is always a no-op, even for
//! nested payloads like `javajavascript:script:`.

use regex::Regex;
use std::sync::LazyLock;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:javascript|data):").unwrap());

/// Sanitize a free-text field.
///
/// Deterministic, pure and idempotent.
pub fn sanitize(input: &str) -> String {
    let mut text: String = input.chars().filter(|c| *c != '<' && *c != '>').collect();

    loop {
        let replaced = SCHEME_RE.replace_all(&text, "");
        if replaced == text {
            break;
        }
        text = replaced.into_owned();
    }

    text.trim().to_string()
}
