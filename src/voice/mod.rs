//! Speech collaborators
//!
//! Both directions sit behind traits so the web layer can run without
//! credentials and tests can substitute fakes.

mod stt;
mod tts;

use async_trait::async_trait;

pub use stt::{DEFAULT_STT_MODEL, SpeechToText};
pub use tts::{TextToSpeech, VoiceProfile};

use crate::Result;
use crate::reply::{Accent, Tone};

/// Audio to text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe WAV audio; an empty string means no speech was heard
    ///
    /// # Errors
    ///
    /// Returns error if transcription fails
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Text to audio
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Render a reply as MP3 audio in the voice for `tone` and `accent`
    ///
    /// # Errors
    ///
    /// Returns error if synthesis fails
    async fn synthesize(&self, text: &str, tone: Tone, accent: Accent) -> Result<Vec<u8>>;
}
