//! Shared test utilities: fake collaborators for the assistant

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use sara_gateway::integrations::{TimezoneResolver, WeatherProvider, WeatherReport};
use sara_gateway::{
    Assistant, Clock, CommandRouter, Error, LanguageModel, Launcher, Platform, Result,
};

/// What the scripted model does on its next call
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    NoOutput,
    Fail(String),
    /// Never answers; exercises the call timeout
    Hang,
}

/// Language model that replays a script and records prompts
#[derive(Default)]
pub struct ScriptedLlm {
    script: Mutex<VecDeque<Script>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(script: impl IntoIterator<Item = Script>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            prompts: Mutex::default(),
        })
    }

    /// Model answering each call with the next text
    pub fn replies<'a>(texts: impl IntoIterator<Item = &'a str>) -> Arc<Self> {
        Self::new(texts.into_iter().map(|t| Script::Reply(t.to_string())))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(Script::Reply(text)) => Ok(Some(text)),
            Some(Script::NoOutput) => Ok(None),
            Some(Script::Fail(reason)) => Err(Error::Llm(reason)),
            Some(Script::Hang) => std::future::pending().await,
            None => Ok(Some("Okay. [tone:professional]".to_string())),
        }
    }
}

/// Launcher that records attempts instead of starting anything
pub struct RecordingLauncher {
    platform: Platform,
    /// Programs or URLs that fail when attempted
    failing: Vec<String>,
    attempts: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn new(platform: Platform) -> Arc<Self> {
        Self::failing(platform, &[])
    }

    pub fn failing(platform: Platform, failing: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            platform,
            failing: failing.iter().map(ToString::to_string).collect(),
            attempts: Mutex::default(),
        })
    }

    /// Every attempt so far, as `open <url>` or `spawn <program>`
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    fn attempt(&self, what: String, target: &str) -> Result<()> {
        self.attempts.lock().unwrap().push(what);
        if self.failing.iter().any(|f| f == target) {
            Err(Error::Launch(format!("{target} unavailable")))
        } else {
            Ok(())
        }
    }
}

impl Launcher for RecordingLauncher {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.attempt(format!("open {url}"), url)
    }

    fn spawn(&self, program: &str, _args: &[&str]) -> Result<()> {
        self.attempt(format!("spawn {program}"), program)
    }
}

/// Clock frozen at one instant
pub struct FixedClock {
    utc: DateTime<Utc>,
    local: NaiveDateTime,
}

impl FixedClock {
    /// Local time fixed at the given date and time; UTC is the same wall time
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Arc<Self> {
        let local = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        Arc::new(Self {
            utc: Utc.from_utc_datetime(&local),
            local,
        })
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn now_local(&self) -> NaiveDateTime {
        self.local
    }
}

/// Resolver returning one zone for every place, or failing
pub struct FakeTimezones(pub Option<Tz>);

#[async_trait]
impl TimezoneResolver for FakeTimezones {
    async fn resolve_timezone(&self, place: &str) -> Result<Tz> {
        self.0
            .ok_or_else(|| Error::Geocoding(format!("no match for {place}")))
    }
}

/// Weather provider with a canned answer that records queried places
pub struct FakeWeather {
    report: Option<WeatherReport>,
    places: Mutex<Vec<String>>,
}

impl FakeWeather {
    pub fn sunny(temp_celsius: f64) -> Arc<Self> {
        Arc::new(Self {
            report: Some(WeatherReport {
                description: "clear sky".to_string(),
                temp_celsius,
            }),
            places: Mutex::default(),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            report: None,
            places: Mutex::default(),
        })
    }

    pub fn places(&self) -> Vec<String> {
        self.places.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current_weather(&self, place: &str) -> Result<WeatherReport> {
        self.places.lock().unwrap().push(place.to_string());
        self.report
            .clone()
            .ok_or_else(|| Error::Weather("city not found".to_string()))
    }
}

/// Everything an assistant under test talks to
pub struct Harness {
    pub llm: Arc<ScriptedLlm>,
    pub launcher: Arc<RecordingLauncher>,
    pub weather: Arc<FakeWeather>,
    pub notes: tempfile::TempDir,
}

impl Harness {
    pub fn new(llm: Arc<ScriptedLlm>) -> Self {
        Self {
            llm,
            launcher: RecordingLauncher::new(Platform::Other),
            weather: FakeWeather::sunny(18.5),
            notes: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_launcher(mut self, launcher: Arc<RecordingLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn with_weather(mut self, weather: Arc<FakeWeather>) -> Self {
        self.weather = weather;
        self
    }

    pub fn note_path(&self) -> PathBuf {
        self.notes.path().join("notes.txt")
    }

    /// Router with a 14:05 clock, Tokyo timezones and sunny weather
    pub fn router(&self) -> CommandRouter {
        CommandRouter::new(
            self.launcher.clone(),
            FixedClock::at(2025, 4, 9, 14, 5),
            self.note_path(),
        )
        .timezones(Arc::new(FakeTimezones(Some(chrono_tz::Asia::Tokyo))))
        .weather(self.weather.clone())
    }

    pub fn assistant(&self) -> Assistant {
        Assistant::new(self.router(), self.llm.clone())
    }
}
