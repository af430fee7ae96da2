//! "search for <query>": open a web search in the browser

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{Intent, Utterance, run_launcher};
use crate::platform::Launcher;
use crate::reply::{Accent, ReplyEnvelope};

/// Search URL prefix; the percent-encoded query is appended
pub const SEARCH_URL: &str = "https://www.google.com/search?q=";

static TRIGGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsearch for (.+)").expect("valid regex"));

static FILLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:for me|please|now|in the browser|in browser)\b").expect("valid regex")
});

pub(super) fn matches(utterance: &Utterance<'_>) -> Option<Intent> {
    let caps = TRIGGER_REGEX.captures(utterance.normalized())?;
    Some(Intent::Search {
        query: clean_query(&caps[1]),
    })
}

fn clean_query(text: &str) -> String {
    let without_filler = FILLER_REGEX.replace_all(text, " ");
    without_filler
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['.', '?', '!'])
        .trim_end()
        .to_string()
}

pub(super) async fn run(launcher: &Arc<dyn Launcher>, query: &str, accent: Accent) -> ReplyEnvelope {
    if query.is_empty() {
        return ReplyEnvelope::professional("Search failed: nothing to search for.", accent);
    }

    let url = format!("{SEARCH_URL}{}", urlencoding::encode(query));
    let result = run_launcher(launcher, move |l| l.open_url(&url)).await;

    match result {
        Ok(()) => ReplyEnvelope::professional(format!("Searching for \"{query}\"."), accent),
        Err(e) => {
            tracing::warn!(error = %e, query = %query, "search launch failed");
            ReplyEnvelope::professional(format!("Search failed: {e}"), accent)
        }
    }
}
