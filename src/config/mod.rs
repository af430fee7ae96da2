//! Configuration management for the SARA gateway

pub mod file;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::dialogue::{DEFAULT_HISTORY_TURNS, DEFAULT_MAX_SENTENCES};
use crate::dialogue::prompt::DEFAULT_ASSISTANT_NAME;
use crate::llm::{DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL};
use crate::voice::DEFAULT_STT_MODEL;
use crate::{Error, Result};

use file::SaraConfigFile;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bound on outbound calls, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// SARA gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Assistant persona name
    pub name: String,

    /// Language model configuration
    pub llm: LlmConfig,

    /// Voice configuration
    pub voice: VoiceConfig,

    /// OpenWeatherMap API key; weather replies degrade without it
    pub openweather_api_key: Option<String>,

    /// Append-only note log
    pub notes_path: PathBuf,

    /// HTTP API server configuration
    pub api_server: ApiServerConfig,

    /// Bound on every outbound call
    pub timeout: Duration,

    /// Turns of history kept
    pub history_turns: usize,

    /// Sentence limit on model replies
    pub max_sentences: usize,
}

/// Language model configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Gemini API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// API base URL
    pub url: String,
}

/// Voice processing configuration
#[derive(Debug, Clone, Default)]
pub struct VoiceConfig {
    /// `OpenAI` API key for Whisper; audio input is disabled without it
    pub openai_api_key: Option<String>,

    /// STT model for Whisper
    pub stt_model: String,

    /// Google Cloud API key for TTS; replies are text-only without it
    pub google_tts_api_key: Option<String>,
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Path to static files directory (web UI and synthesized audio)
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment and the TOML file
    ///
    /// # Errors
    ///
    /// Returns error if no Gemini API key is configured
    pub fn load() -> Result<Self> {
        Self::from_sources(file::load_config_file(), |key| std::env::var(key).ok())
    }

    /// Assemble configuration with precedence env > toml > default
    ///
    /// # Errors
    ///
    /// Returns error if no Gemini API key is configured
    pub fn from_sources<F>(fc: SaraConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .or(fc.api_keys.gemini)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not set".to_string()))?;

        let llm = LlmConfig {
            api_key,
            model: non_empty("SARA_LLM_MODEL")
                .or(fc.llm.model)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            url: non_empty("SARA_LLM_URL")
                .or(fc.llm.url)
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
        };

        // Voice config (env > toml > default)
        let voice = VoiceConfig {
            openai_api_key: non_empty("OPENAI_API_KEY").or(fc.api_keys.openai),
            stt_model: non_empty("SARA_STT_MODEL")
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| DEFAULT_STT_MODEL.to_string()),
            google_tts_api_key: non_empty("GOOGLE_TTS_API_KEY").or(fc.api_keys.google_tts),
        };

        let api_server = ApiServerConfig {
            port: parse_setting("SARA_PORT", non_empty("SARA_PORT"))
                .or(fc.server.port)
                .unwrap_or(DEFAULT_PORT),
            static_dir: non_empty("SARA_STATIC_DIR")
                .or(fc.server.static_dir)
                .map_or_else(|| PathBuf::from("static"), PathBuf::from),
        };

        let timeout_secs = parse_setting("SARA_TIMEOUT_SECS", non_empty("SARA_TIMEOUT_SECS"))
            .or(fc.server.timeout_secs)
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let notes_path = non_empty("SARA_NOTES_PATH")
            .or(fc.notes_path)
            .map_or_else(default_notes_path, PathBuf::from);

        Ok(Self {
            name: non_empty("SARA_NAME")
                .or(fc.name)
                .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
            llm,
            voice,
            openweather_api_key: non_empty("OPENWEATHER_API_KEY").or(fc.api_keys.openweather),
            notes_path,
            api_server,
            timeout: Duration::from_secs(timeout_secs),
            history_turns: parse_setting("SARA_HISTORY_TURNS", non_empty("SARA_HISTORY_TURNS"))
                .or(fc.dialogue.history_turns)
                .unwrap_or(DEFAULT_HISTORY_TURNS),
            max_sentences: parse_setting("SARA_MAX_SENTENCES", non_empty("SARA_MAX_SENTENCES"))
                .or(fc.dialogue.max_sentences)
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_MAX_SENTENCES),
        })
    }
}

/// Parse a numeric setting, ignoring values that don't parse
fn parse_setting<T: FromStr>(key: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(key, value = %value, "ignoring non-numeric setting");
            None
        }
    }
}

/// Default note log: `~/notes.txt`
fn default_notes_path() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("notes.txt"),
        |d| d.home_dir().join("notes.txt"),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_gemini_key_is_fatal() {
        let result = Config::from_sources(SaraConfigFile::default(), env_of(&[]));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Config::from_sources(SaraConfigFile::default(), env_of(&[("GEMINI_API_KEY", "  ")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_sources(SaraConfigFile::default(), env_of(&[("GEMINI_API_KEY", "k")])).unwrap();

        assert_eq!(config.name, "SARA");
        assert_eq!(config.llm.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.api_server.port, 5000);
        assert_eq!(config.api_server.static_dir, PathBuf::from("static"));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.history_turns, 6);
        assert_eq!(config.max_sentences, 3);
        assert!(config.voice.openai_api_key.is_none());
        assert!(config.openweather_api_key.is_none());
        assert!(config.notes_path.ends_with("notes.txt"));
    }

    #[test]
    fn test_env_overrides_file() {
        let fc: SaraConfigFile = toml::from_str(
            r#"
            name = "Ada"
            [api_keys]
            gemini = "from-file"
            [server]
            port = 8080
            timeout_secs = 30
            "#,
        )
        .unwrap();

        let config = Config::from_sources(
            fc,
            env_of(&[("SARA_PORT", "9000"), ("SARA_HISTORY_TURNS", "10")]),
        )
        .unwrap();

        assert_eq!(config.llm.api_key, "from-file");
        assert_eq!(config.name, "Ada");
        assert_eq!(config.api_server.port, 9000);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.history_turns, 10);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = Config::from_sources(
            SaraConfigFile::default(),
            env_of(&[
                ("GEMINI_API_KEY", "k"),
                ("SARA_PORT", "http"),
                ("SARA_TIMEOUT_SECS", "0"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_server.port, DEFAULT_PORT);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
