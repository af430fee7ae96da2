//! Built-in commands handled locally instead of by the language model
//!
//! Matchers run in a fixed priority order and the first match wins:
//!
//! | Priority | Command | Trigger |
//! |----------|---------|---------|
//! | 1 | search  | "search for <query>" anywhere |
//! | 2 | time    | "what's the time", "what time is it", "current time", "time in <place>" |
//! | 3 | note    | utterance starts with "take a note" |
//! | 4 | music   | "play music" anywhere |
//! | 5 | weather | "weather in" anywhere |
//!
//! Triggers overlap ("search for the current time"), so the order is part of
//! the contract.

mod location;
mod music;
mod note;
mod search;
mod time;
mod weather;

use std::path::PathBuf;
use std::sync::Arc;

pub use location::resolve_place;
pub use music::{WEB_PLAYER_URL, launch_plan};
pub use search::SEARCH_URL;

use crate::clock::Clock;
use crate::integrations::{TimezoneResolver, WeatherProvider};
use crate::platform::Launcher;
use crate::reply::{Accent, ReplyEnvelope};

/// An utterance prepared for matching
#[derive(Debug)]
pub struct Utterance<'a> {
    /// Text as received
    raw: &'a str,
    /// Lower-cased and trimmed
    normalized: String,
}

impl<'a> Utterance<'a> {
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            normalized: raw.trim().to_lowercase(),
        }
    }

    #[must_use]
    pub const fn raw(&self) -> &str {
        self.raw
    }

    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// A recognized command with its extracted arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Search { query: String },
    Time { location: Option<String> },
    Note { body: String },
    Music,
    Weather { location: Option<String> },
}

impl Intent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::Time { .. } => "time",
            Self::Note { .. } => "note",
            Self::Music => "music",
            Self::Weather { .. } => "weather",
        }
    }
}

type Matcher = fn(&Utterance<'_>) -> Option<Intent>;

/// Command matchers in priority order
const MATCHERS: [Matcher; 5] = [
    search::matches,
    time::matches,
    note::matches,
    music::matches,
    weather::matches,
];

/// Recognize a built-in command, or `None` if the utterance is conversational
#[must_use]
pub fn parse_intent(raw: &str) -> Option<Intent> {
    let utterance = Utterance::new(raw);
    MATCHERS.iter().find_map(|matches| matches(&utterance))
}

/// Dispatches utterances to built-in command handlers
pub struct CommandRouter {
    launcher: Arc<dyn Launcher>,
    clock: Arc<dyn Clock>,
    timezones: Option<Arc<dyn TimezoneResolver>>,
    weather: Option<Arc<dyn WeatherProvider>>,
    note_path: PathBuf,
}

impl CommandRouter {
    /// Create a router; time and weather lookups are disabled until configured
    #[must_use]
    pub fn new(launcher: Arc<dyn Launcher>, clock: Arc<dyn Clock>, note_path: PathBuf) -> Self {
        Self {
            launcher,
            clock,
            timezones: None,
            weather: None,
            note_path,
        }
    }

    /// Set the timezone resolver for "time in <place>"
    #[must_use]
    pub fn timezones(mut self, resolver: Arc<dyn TimezoneResolver>) -> Self {
        self.timezones = Some(resolver);
        self
    }

    /// Set the weather provider for "weather in <place>"
    #[must_use]
    pub fn weather(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }

    /// Path of the append-only note log
    #[must_use]
    pub fn note_path(&self) -> &std::path::Path {
        &self.note_path
    }

    /// Handle `raw` if it is a built-in command
    ///
    /// Returns `None` when no command matches; the caller then takes the
    /// conversational path. Handler failures are reported inside the returned
    /// envelope, never as `None`.
    pub async fn route(&self, raw: &str, accent: Accent) -> Option<ReplyEnvelope> {
        let intent = parse_intent(raw)?;
        tracing::info!(command = intent.name(), "handling built-in command");
        Some(self.execute(intent, accent).await)
    }

    /// Run a recognized command
    pub async fn execute(&self, intent: Intent, accent: Accent) -> ReplyEnvelope {
        match intent {
            Intent::Search { query } => search::run(&self.launcher, &query, accent).await,
            Intent::Time { location } => {
                time::run(
                    self.clock.as_ref(),
                    self.timezones.as_deref(),
                    location.as_deref(),
                    accent,
                )
                .await
            }
            Intent::Note { body } => {
                note::run(self.clock.as_ref(), &self.note_path, &body, accent).await
            }
            Intent::Music => music::run(&self.launcher, accent).await,
            Intent::Weather { location } => {
                weather::run(self.weather.as_deref(), location.as_deref(), accent).await
            }
        }
    }
}

/// Run a blocking launcher call off the async runtime
async fn run_launcher<F>(launcher: &Arc<dyn Launcher>, f: F) -> crate::Result<()>
where
    F: FnOnce(&dyn Launcher) -> crate::Result<()> + Send + 'static,
{
    let launcher = Arc::clone(launcher);
    tokio::task::spawn_blocking(move || f(launcher.as_ref()))
        .await
        .map_err(|e| crate::Error::Launch(e.to_string()))?
}
