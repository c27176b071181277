//! Line-level helpers for the `key = value` settings format.

/// What: Check if a settings line carries no data.
///
/// Inputs:
/// - `line`: Raw line from `settings.conf`
///
/// Output:
/// - `true` for blank lines and whole-line comments, `false` otherwise
///
/// Details:
/// - Whole-line comments start with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Split a settings line into a normalized key and a comment-free value.
///
/// Inputs:
/// - `line`: Line in `key = value` form
///
/// Output:
/// - `Some((key, value))` when the line contains `=`, `None` otherwise
///
/// Details:
/// - Splits on the first `=` only, so values may contain `=` (query strings, URLs).
/// - Keys are lowercased and `.`/`-`/space are folded to `_`.
/// - Inline comments are stripped from the value via [`strip_inline_comment`].
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_val) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_val).to_string()))
}

/// What: Remove a trailing inline comment from a settings value.
///
/// Inputs:
/// - `s`: Value part of a settings line
///
/// Output:
/// - Trimmed value without ` #` or ` //` comment tails
///
/// Details:
/// - A comment marker only counts when preceded by whitespace, so `https://host`
///   and `a#b` survive intact.
#[must_use]
pub fn strip_inline_comment(s: &str) -> &str {
    let mut end = s.len();
    for marker in [" #", "\t#", " //", "\t//"] {
        if let Some(i) = s.find(marker) {
            end = end.min(i);
        }
    }
    s[..end].trim()
}
