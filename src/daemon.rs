//! Daemon - wires configuration to collaborators and serves the API

use std::sync::Arc;

use crate::api::ApiServerBuilder;
use crate::clock::SystemClock;
use crate::commands::CommandRouter;
use crate::dialogue::Assistant;
use crate::integrations::{OpenMeteoGeocoder, OpenWeatherMap};
use crate::llm::GeminiClient;
use crate::platform::SystemLauncher;
use crate::voice::{SpeechToText, Synthesizer, TextToSpeech, Transcriber};
use crate::{Config, Result};

/// The SARA daemon
pub struct Daemon {
    config: Config,
    assistant: Arc<Assistant>,
    transcriber: Option<Arc<dyn Transcriber>>,
    synthesizer: Option<Arc<dyn Synthesizer>>,
}

impl Daemon {
    /// Build every collaborator from configuration
    ///
    /// Optional collaborators whose keys are missing are left out and logged.
    ///
    /// # Errors
    ///
    /// Returns error if the language model client cannot be created
    pub fn new(config: Config) -> Result<Self> {
        let assistant = Arc::new(build_assistant(&config)?);

        let transcriber: Option<Arc<dyn Transcriber>> = match &config.voice.openai_api_key {
            Some(key) => Some(Arc::new(SpeechToText::new_whisper(
                key.clone(),
                config.voice.stt_model.clone(),
                config.timeout,
            )?)),
            None => {
                tracing::info!("OPENAI_API_KEY not set - audio input disabled");
                None
            }
        };

        let synthesizer: Option<Arc<dyn Synthesizer>> = match &config.voice.google_tts_api_key {
            Some(key) => Some(Arc::new(TextToSpeech::new_google(key.clone(), config.timeout)?)),
            None => {
                tracing::info!("GOOGLE_TTS_API_KEY not set - replies will be text only");
                None
            }
        };

        Ok(Self {
            config,
            assistant,
            transcriber,
            synthesizer,
        })
    }

    /// The dialogue orchestrator
    #[must_use]
    pub const fn assistant(&self) -> &Arc<Assistant> {
        &self.assistant
    }

    /// Speech synthesizer, when configured
    #[must_use]
    pub fn synthesizer(&self) -> Option<&Arc<dyn Synthesizer>> {
        self.synthesizer.as_ref()
    }

    /// Serve the HTTP API until shutdown
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or run
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            assistant = %self.config.name,
            model = %self.config.llm.model,
            notes = %self.config.notes_path.display(),
            "daemon running"
        );

        let mut builder = ApiServerBuilder::new(self.assistant, self.config.api_server.port)
            .static_dir(self.config.api_server.static_dir.clone());
        if let Some(transcriber) = self.transcriber {
            builder = builder.transcriber(transcriber);
        }
        if let Some(synthesizer) = self.synthesizer {
            builder = builder.synthesizer(synthesizer);
        }

        builder.build().run().await
    }
}

/// Assemble the orchestrator with production collaborators
///
/// # Errors
///
/// Returns error if an HTTP client cannot be created or the Gemini key is empty
pub fn build_assistant(config: &Config) -> Result<Assistant> {
    let llm = GeminiClient::new(
        config.llm.api_key.clone(),
        config.llm.model.clone(),
        config.llm.url.clone(),
        config.timeout,
    )?;

    let mut router = CommandRouter::new(
        Arc::new(SystemLauncher::default()),
        Arc::new(SystemClock),
        config.notes_path.clone(),
    )
    .timezones(Arc::new(OpenMeteoGeocoder::new(config.timeout)?));

    match &config.openweather_api_key {
        Some(key) => {
            router = router.weather(Arc::new(OpenWeatherMap::new(key.clone(), config.timeout)?));
        }
        None => tracing::info!("OPENWEATHER_API_KEY not set - weather lookups disabled"),
    }

    Ok(Assistant::new(router, Arc::new(llm))
        .name(config.name.clone())
        .history_turns(config.history_turns)
        .max_sentences(config.max_sentences)
        .llm_timeout(config.timeout))
}
