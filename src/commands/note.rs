//! "take a note ...": append to the note log

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tokio::io::AsyncWriteExt;

use super::{Intent, Utterance};
use crate::clock::Clock;
use crate::reply::{Accent, ReplyEnvelope};

/// Anchored at the start of the utterance, unlike the other triggers
static TRIGGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*take a note\b[,:.]?\s*(.*)$").expect("valid regex"));

static FILLER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^for me\b[,:.]?\s*").expect("valid regex"));

pub(super) fn matches(utterance: &Utterance<'_>) -> Option<Intent> {
    let caps = TRIGGER_REGEX.captures(utterance.raw())?;
    let body = FILLER_REGEX.replace(&caps[1], "").trim().to_string();
    Some(Intent::Note { body })
}

/// Format one log line, e.g. `2025-04-09 14:05 : buy milk`
fn format_entry(timestamp: &chrono::NaiveDateTime, body: &str) -> String {
    format!("{} : {body}\n", timestamp.format("%Y-%m-%d %H:%M"))
}

async fn append(path: &Path, entry: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(entry.as_bytes()).await?;
    file.flush().await
}

pub(super) async fn run(clock: &dyn Clock, path: &Path, body: &str, accent: Accent) -> ReplyEnvelope {
    if body.is_empty() {
        return ReplyEnvelope::professional("There was nothing to note.", accent);
    }

    let entry = format_entry(&clock.now_local(), body);
    match append(path, &entry).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), "note saved");
            ReplyEnvelope::professional(
                format!("Your note has been saved to {}.", path.display()),
                accent,
            )
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to write note");
            ReplyEnvelope::professional(format!("Note failed: {e}"), accent)
        }
    }
}
