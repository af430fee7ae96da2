//! HTTP API server for the SARA gateway

pub mod converse;
pub mod health;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::dialogue::Assistant;
use crate::voice::{Synthesizer, Transcriber};

/// File name of the most recent synthesized reply inside the static directory
pub const SPEECH_FILE: &str = "response.mp3";

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub assistant: Arc<Assistant>,
    /// Present only when an STT key is configured
    pub transcriber: Option<Arc<dyn Transcriber>>,
    /// Present only when a TTS key is configured
    pub synthesizer: Option<Arc<dyn Synthesizer>>,
    pub static_dir: PathBuf,
}

/// Configuration for building an API server
pub struct ApiServerBuilder {
    assistant: Arc<Assistant>,
    port: u16,
    transcriber: Option<Arc<dyn Transcriber>>,
    synthesizer: Option<Arc<dyn Synthesizer>>,
    static_dir: PathBuf,
}

impl ApiServerBuilder {
    /// Create a new API server builder
    #[must_use]
    pub fn new(assistant: Arc<Assistant>, port: u16) -> Self {
        Self {
            assistant,
            port,
            transcriber: None,
            synthesizer: None,
            static_dir: PathBuf::from("static"),
        }
    }

    /// Enable audio input
    #[must_use]
    pub fn transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Enable spoken replies
    #[must_use]
    pub fn synthesizer(mut self, synthesizer: Arc<dyn Synthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Set the static files directory for the web UI and synthesized audio
    #[must_use]
    pub fn static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = dir;
        self
    }

    /// Build the API server
    #[must_use]
    pub fn build(self) -> ApiServer {
        let state = Arc::new(ApiState {
            assistant: self.assistant,
            transcriber: self.transcriber,
            synthesizer: self.synthesizer,
            static_dir: self.static_dir,
        });

        ApiServer {
            state,
            port: self.port,
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let static_dir = &self.state.static_dir;
        let index_file = static_dir.join("index.html");

        let router = Router::new()
            .nest("/api", converse::router(self.state.clone()))
            .merge(health::router())
            .merge(health::ready_router(self.state.clone()))
            .nest_service("/static", ServeDir::new(static_dir))
            .route_service("/", ServeFile::new(&index_file));

        tracing::debug!(path = %static_dir.display(), "serving static files");

        // CORS layer for cross-origin requests from frontend
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(
            port = self.port,
            stt = self.state.transcriber.is_some(),
            tts = self.state.synthesizer.is_some(),
            "API server listening"
        );

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
