//! Reply length policy
//!
//! Sentences are split on the literal `". "` sequence. This is an
//! approximation: abbreviations such as "Dr. Smith" count as a boundary and
//! sentences ending in `!` or `?` do not.
//!
//! Replies with fewer than two periods are not sentence-trimmed at all; they
//! get a hard character cap instead. The two rules can disagree on the same
//! text length, and that divergence is kept as-is.

/// Sentence boundary heuristic
const SENTENCE_BOUNDARY: &str = ". ";

/// Default maximum sentences kept in a reply
pub const DEFAULT_MAX_SENTENCES: usize = 3;

/// Character cap for replies with fewer than two periods
pub const SHORT_REPLY_MAX_CHARS: usize = 500;

/// Enforce the sentence/length policy on cleaned reply text
#[must_use]
pub fn trim_reply(text: &str, max_sentences: usize) -> String {
    if text.matches('.').count() < 2 {
        return cap_chars(text, SHORT_REPLY_MAX_CHARS);
    }

    let segments: Vec<&str> = text.split(SENTENCE_BOUNDARY).collect();
    if segments.len() <= max_sentences {
        return text.to_string();
    }

    let mut trimmed = segments[..max_sentences].join(SENTENCE_BOUNDARY);
    trimmed.push('.');
    trimmed
}

fn cap_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
