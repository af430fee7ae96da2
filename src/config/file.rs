//! TOML configuration file loading
//!
//! Supports `~/.config/sara/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct SaraConfigFile {
    /// Assistant persona name
    #[serde(default)]
    pub name: Option<String>,

    /// Path of the note log
    #[serde(default)]
    pub notes_path: Option<String>,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmFileConfig,

    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Dialogue limits
    #[serde(default)]
    pub dialogue: DialogueFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// LLM-related configuration
#[derive(Debug, Default, Deserialize)]
pub struct LlmFileConfig {
    /// Model identifier (e.g. "gemini-2.0-flash")
    pub model: Option<String>,

    /// API base URL
    pub url: Option<String>,
}

/// Voice processing configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub gemini: Option<String>,
    pub openai: Option<String>,
    pub google_tts: Option<String>,
    pub openweather: Option<String>,
}

/// Conversation limits
#[derive(Debug, Default, Deserialize)]
pub struct DialogueFileConfig {
    /// Turns of history kept
    pub history_turns: Option<usize>,

    /// Sentence limit on model replies
    pub max_sentences: Option<usize>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,

    /// Static files directory
    pub static_dir: Option<String>,

    /// Timeout for outbound calls, in seconds
    pub timeout_secs: Option<u64>,
}

/// Load the TOML config file from the standard path
///
/// Returns `SaraConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> SaraConfigFile {
    let Some(path) = config_file_path() else {
        return SaraConfigFile::default();
    };

    if !path.exists() {
        return SaraConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                SaraConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            SaraConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/sara/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("sara").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file() {
        let parsed: SaraConfigFile = toml::from_str(
            r#"
            name = "Ada"

            [api_keys]
            gemini = "abc"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(parsed.name.as_deref(), Some("Ada"));
        assert_eq!(parsed.api_keys.gemini.as_deref(), Some("abc"));
        assert_eq!(parsed.server.port, Some(8080));
        assert!(parsed.llm.model.is_none());
        assert!(parsed.dialogue.history_turns.is_none());
    }

    #[test]
    fn test_empty_file() {
        let parsed: SaraConfigFile = toml::from_str("").unwrap();
        assert!(parsed.notes_path.is_none());
    }
}
