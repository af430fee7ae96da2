//! Text-to-speech (TTS) processing with Google Cloud Text-to-Speech

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::Synthesizer;
use crate::dialogue::speakable;
use crate::reply::{Accent, Tone};
use crate::{Error, Result};

const GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Voice parameters for one tone/accent pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceProfile {
    pub language_code: &'static str,
    pub voice_name: &'static str,
    pub speaking_rate: f64,
    pub pitch: f64,
}

impl VoiceProfile {
    /// Voice for an accent, shaped by a tone
    #[must_use]
    pub const fn for_reply(tone: Tone, accent: Accent) -> Self {
        let (language_code, voice_name) = match accent {
            Accent::American => ("en-US", "en-US-Chirp3-HD-Achernar"),
            Accent::British => ("en-GB", "en-GB-Standard-F"),
            Accent::Australian => ("en-AU", "en-AU-Wavenet-A"),
            Accent::Indian => ("en-IN", "en-IN-Wavenet-A"),
        };
        let (speaking_rate, pitch) = match tone {
            Tone::Professional => (1.0, 0.0),
            Tone::Friendly => (1.1, 2.0),
            Tone::Sad => (0.7, -5.0),
            Tone::Happy => (1.15, 4.0),
            Tone::Angry => (1.2, 2.5),
            Tone::Flirty => (1.05, 3.5),
        };

        Self {
            language_code,
            voice_name,
            speaking_rate,
            pitch,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

impl<'a> SynthesizeRequest<'a> {
    fn new(text: &'a str, profile: &VoiceProfile) -> Self {
        Self {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: profile.language_code,
                name: profile.voice_name,
                ssml_gender: "FEMALE",
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: profile.speaking_rate,
                pitch: profile.pitch,
            },
        }
    }
}

/// Synthesizes speech from text
pub struct TextToSpeech {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl TextToSpeech {
    /// Create a new Google TTS instance
    ///
    /// # Errors
    ///
    /// Returns error if API key is missing or the HTTP client cannot be built
    pub fn new_google(api_key: String, timeout: Duration) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("Google API key required for TTS".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            api_key,
            url: GOOGLE_TTS_URL.to_string(),
        })
    }

    /// Point at a different synthesis endpoint
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait]
impl Synthesizer for TextToSpeech {
    async fn synthesize(&self, text: &str, tone: Tone, accent: Accent) -> Result<Vec<u8>> {
        let spoken = speakable(text);
        if spoken.is_empty() {
            return Err(Error::Tts("nothing to speak".to_string()));
        }

        let profile = VoiceProfile::for_reply(tone, accent);
        tracing::debug!(voice = profile.voice_name, tone = %tone, chars = spoken.len(), "synthesizing speech");

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&SynthesizeRequest::new(&spoken, &profile))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("Google TTS error {status}: {body}")));
        }

        let body: SynthesizeResponse = response.json().await?;
        decode_audio(&body.audio_content)
    }
}

fn decode_audio(content: &str) -> Result<Vec<u8>> {
    if content.is_empty() {
        return Err(Error::Tts("response contained no audio".to_string()));
    }
    STANDARD
        .decode(content)
        .map_err(|e| Error::Tts(format!("invalid audio encoding: {e}")))
}
