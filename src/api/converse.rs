//! Conversation endpoints: text and recorded audio in, reply envelope out

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};

use super::{ApiState, SPEECH_FILE};
use crate::reply::ReplyEnvelope;

/// Reply text when the recording contained no speech
pub const NO_SPEECH_REPLY: &str = "[No speech detected]";

/// Build conversation router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/text", post(text))
        .route("/audio", post(audio))
        .with_state(state)
}

/// Text conversation request
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub message: String,
}

/// Reply envelope plus transport extras
#[derive(Debug, Serialize)]
pub struct ConverseResponse {
    #[serde(flatten)]
    pub reply: ReplyEnvelope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

/// Reply for a recording without speech
#[derive(Debug, Serialize)]
pub struct NoSpeechResponse {
    pub response: &'static str,
}

/// Handle a typed message
async fn text(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ConverseResponse>, ConverseError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ConverseError::BadRequest("Empty message"));
    }

    let reply = state.assistant.converse(message).await;
    let audio_url = speak(&state, &reply).await;

    Ok(Json(ConverseResponse {
        reply,
        audio_url,
        transcription: None,
    }))
}

/// Handle a recorded utterance (WAV bytes)
async fn audio(State(state): State<Arc<ApiState>>, body: Bytes) -> Result<Response, ConverseError> {
    if body.is_empty() {
        return Err(ConverseError::BadRequest("Empty audio data"));
    }

    let transcriber = state
        .transcriber
        .as_ref()
        .ok_or(ConverseError::NotConfigured("STT not configured"))?;

    let transcription = transcriber
        .transcribe(&body)
        .await
        .map_err(|e| ConverseError::TranscriptionFailed(e.to_string()))?;

    if transcription.trim().is_empty() {
        tracing::info!(audio_bytes = body.len(), "no speech in recording");
        return Ok(Json(NoSpeechResponse {
            response: NO_SPEECH_REPLY,
        })
        .into_response());
    }

    let reply = state.assistant.converse(&transcription).await;
    let audio_url = speak(&state, &reply).await;

    Ok(Json(ConverseResponse {
        reply,
        audio_url,
        transcription: Some(transcription),
    })
    .into_response())
}

/// Synthesize the reply into the static directory, returning its URL
///
/// Synthesis problems are logged and the reply goes out without audio.
async fn speak(state: &ApiState, reply: &ReplyEnvelope) -> Option<String> {
    let synthesizer = state.synthesizer.as_ref()?;

    let audio = match synthesizer
        .synthesize(&reply.text, reply.tone, reply.accent)
        .await
    {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!(error = %e, "speech synthesis failed");
            return None;
        }
    };

    let path = state.static_dir.join(SPEECH_FILE);
    let written = async {
        tokio::fs::create_dir_all(&state.static_dir).await?;
        tokio::fs::write(&path, &audio).await
    }
    .await;

    match written {
        Ok(()) => {
            tracing::debug!(path = %path.display(), bytes = audio.len(), "speech written");
            Some(format!("/static/{SPEECH_FILE}"))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to write speech file");
            None
        }
    }
}

/// Conversation API errors
#[derive(Debug)]
pub enum ConverseError {
    NotConfigured(&'static str),
    BadRequest(&'static str),
    TranscriptionFailed(String),
}

impl IntoResponse for ConverseError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code, message) = match self {
            Self::NotConfigured(msg) => (StatusCode::SERVICE_UNAVAILABLE, "not_configured", msg.to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_string()),
            Self::TranscriptionFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "transcription_failed", msg),
        };

        (status, Json(ErrorResponse { error: ErrorBody { code, message } })).into_response()
    }
}
