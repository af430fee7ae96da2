//! Inline tone/accent markers embedded in model output
//!
//! The model is asked to append `[tone:<word>]` and, on request,
//! `[accent:<word>]` to its reply. Markers are plain text with no schema
//! guarantee, so a missing or malformed marker is the normal case and never
//! an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::reply::{Accent, Tone};

/// A single marker, capturing keyword and value
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(tone|accent):(\w+)\]").expect("valid regex")
});

/// A run of adjacent markers with the whitespace around them
static MARKER_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\s*\[(?:tone|accent):\w+\])+\s*").expect("valid regex")
});

/// Any bracketed token on a single line
static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\[\]\n]*\]").expect("valid regex"));

/// Emoji and pictograph codepoint ranges the synthesizer must not read out
static EMOJI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2600}-\x{27BF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA70}-\x{1FAFF}",
        "]+",
    ))
    .expect("valid regex")
});

/// Model output split into display text and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Text with every marker removed
    pub text: String,
    /// First tone marker, if it named a known tone
    pub tone: Option<Tone>,
    /// First accent marker, if it named a known accent
    pub accent: Option<Accent>,
}

/// Extract tone/accent markers from raw model output
///
/// When several markers of the same kind appear, the leftmost one wins.
#[must_use]
pub fn parse(raw: &str) -> ParsedReply {
    let mut tone_value = None;
    let mut accent_value = None;

    for caps in MARKER_REGEX.captures_iter(raw) {
        let value = caps[2].to_lowercase();
        if caps[1].eq_ignore_ascii_case("tone") {
            tone_value.get_or_insert(value);
        } else {
            accent_value.get_or_insert(value);
        }
    }

    let tone = tone_value.as_deref().and_then(Tone::from_name);
    let accent = accent_value.as_deref().and_then(Accent::from_name);

    if tone_value.is_some() && tone.is_none() {
        tracing::debug!(value = ?tone_value, "ignoring unknown tone marker");
    }
    if accent_value.is_some() && accent.is_none() {
        tracing::debug!(value = ?accent_value, "ignoring unknown accent marker");
    }

    ParsedReply {
        text: strip_markers(raw),
        tone,
        accent,
    }
}

/// Remove every marker, joining the surrounding text with at most one space
#[must_use]
pub fn strip_markers(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last = 0;

    for m in MARKER_RUN_REGEX.find_iter(raw) {
        out.push_str(&raw[last..m.start()]);
        let next = raw[m.end()..].chars().next();
        if !out.is_empty() && next.is_some_and(|c| !is_closing_punctuation(c)) {
            out.push(' ');
        }
        last = m.end();
    }
    out.push_str(&raw[last..]);

    out.trim().to_string()
}

const fn is_closing_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | ')')
}

/// Prepare reply text for the synthesizer
///
/// Drops every bracketed token and emoji so that neither is vocalized. The
/// text shown to the user keeps its emoji; only the speech path uses this.
#[must_use]
pub fn speakable(text: &str) -> String {
    let without_brackets = BRACKET_REGEX.replace_all(text, " ");
    let without_emoji = EMOJI_REGEX.replace_all(&without_brackets, "");

    without_emoji.split_whitespace().collect::<Vec<_>>().join(" ")
}
