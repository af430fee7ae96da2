//! Error types for the SARA gateway

use thiserror::Error;

/// Result type alias for SARA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the SARA gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Language model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Place or timezone lookup error
    #[error("geocoding error: {0}")]
    Geocoding(String),

    /// Weather lookup error
    #[error("weather error: {0}")]
    Weather(String),

    /// External process or URL launch error
    #[error("launch error: {0}")]
    Launch(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
