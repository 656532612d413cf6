//! Sentence segmentation with short-fragment merging
//!
//! The splitter produces candidate sentences at sentence-final punctuation
//! (`.`, `!`, `?`) followed by whitespace or end of text. Candidates below
//! [`SHORT_FRAGMENT_CHARS`] are typographically incomplete for a typing
//! exercise (truncated list markers, single words), so they are held in a
//! buffer and attached to the front of the next substantial sentence
//! instead of being emitted on their own. Trailing short fragments with
//! nothing to attach to are emitted as-is rather than dropped.

use crate::normalize::collapse_whitespace;
use regex::Regex;
use std::sync::OnceLock;

/// Candidates shorter than this many Unicode characters are merged forward.
pub const SHORT_FRAGMENT_CHARS: usize = 10;

/// A sentence boundary: a punctuation run followed by whitespace or the end
/// of the text. Punctuation not followed by whitespace (decimal points,
/// abbreviations mid-token) does not split.
fn boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("boundary pattern is valid"))
}

/// Split text into an ordered list of sentences.
///
/// The result is non-empty exactly when the trimmed input is non-empty, and
/// every non-whitespace character of the input appears in some returned
/// sentence. Each candidate keeps its trailing punctuation.
///
/// ```
/// use tipo_text::segment;
/// let sentences = segment("A complete sentence here. Ok.");
/// assert_eq!(sentences, vec!["A complete sentence here.", "Ok."]);
/// ```
pub fn segment(text: &str) -> Vec<String> {
    // Defensive: normalize() already collapses whitespace, but segment()
    // must hold its guarantees for arbitrary input too.
    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<&str> = Vec::new();
    let mut last = 0;
    for boundary in boundary_re().find_iter(&collapsed) {
        candidates.push(&collapsed[last..boundary.end()]);
        last = boundary.end();
    }
    if last < collapsed.len() {
        // Trailing text with no sentence-final punctuation.
        candidates.push(&collapsed[last..]);
    }

    let mut sentences = Vec::new();
    let mut buffer = String::new();
    for candidate in candidates {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(trimmed);
        if trimmed.chars().count() >= SHORT_FRAGMENT_CHARS {
            sentences.push(std::mem::take(&mut buffer));
        }
    }
    // Trailing short fragments with no long sentence to attach to.
    if !buffer.is_empty() {
        sentences.push(buffer);
    }

    if sentences.is_empty() {
        // Nothing was emitted for non-empty input; return the whole text
        // rather than silently dropping it.
        return vec![collapsed];
    }
    sentences
}
