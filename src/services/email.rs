// src/services/email.rs
use std::sync::LazyLock;

use regex::Regex;

// ASCII word boundary: a non-ASCII letter directly before the address still
// counts as a boundary.
const EMAIL_PATTERN: &str = r"(?-u:\b)[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// Returns the first email-shaped token in `text`, if any.
///
/// Only the leftmost match is considered; messages that mention several
/// addresses resolve against the first one.
pub fn extract_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}
