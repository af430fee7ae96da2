//! API endpoint integration tests

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use sara_gateway::api::ApiServerBuilder;
use sara_gateway::voice::{Synthesizer, Transcriber};
use sara_gateway::{Accent, Error, Result, Tone};
use tower::ServiceExt;

mod common;
use common::{Harness, ScriptedLlm};

/// Transcriber returning a fixed text, or failing
struct FakeTranscriber(Option<&'static str>);

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
        self.0
            .map(ToString::to_string)
            .ok_or_else(|| Error::Stt("decoder crashed".to_string()))
    }
}

/// Synthesizer producing fake MP3 bytes, or failing
struct FakeSynthesizer {
    fail: bool,
}

#[async_trait]
impl Synthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str, tone: Tone, accent: Accent) -> Result<Vec<u8>> {
        if self.fail {
            return Err(Error::Tts("quota exceeded".to_string()));
        }
        Ok(format!("ID3 {tone} {accent} {text}").into_bytes())
    }
}

struct TestApp {
    harness: Harness,
    static_dir: tempfile::TempDir,
    transcriber: Option<Arc<dyn Transcriber>>,
    synthesizer: Option<Arc<dyn Synthesizer>>,
}

impl TestApp {
    fn new(llm: Arc<ScriptedLlm>) -> Self {
        Self {
            harness: Harness::new(llm),
            static_dir: tempfile::tempdir().unwrap(),
            transcriber: None,
            synthesizer: None,
        }
    }

    fn transcriber(mut self, transcriber: FakeTranscriber) -> Self {
        self.transcriber = Some(Arc::new(transcriber));
        self
    }

    fn synthesizer(mut self, synthesizer: FakeSynthesizer) -> Self {
        self.synthesizer = Some(Arc::new(synthesizer));
        self
    }

    fn router(&self) -> axum::Router {
        let mut builder = ApiServerBuilder::new(Arc::new(self.harness.assistant()), 0)
            .static_dir(self.static_dir.path().to_path_buf());
        if let Some(transcriber) = &self.transcriber {
            builder = builder.transcriber(transcriber.clone());
        }
        if let Some(synthesizer) = &self.synthesizer {
            builder = builder.synthesizer(synthesizer.clone());
        }
        builder.build().router()
    }
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn text_request(message: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/text")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::json!({ "message": message }).to_string()))
        .unwrap()
}

fn audio_request(bytes: &'static [u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/audio")
        .header("Content-Type", "audio/wav")
        .body(Body::from(bytes))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new(ScriptedLlm::new([]));

    let (status, json) = send(
        app.router(),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_ready_endpoint_reports_voice() {
    let app = TestApp::new(ScriptedLlm::new([])).synthesizer(FakeSynthesizer { fail: false });

    let (status, json) = send(
        app.router(),
        Request::builder().uri("/ready").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["assistant"], "SARA");
    assert_eq!(json["checks"]["stt"]["status"], "unavailable");
    assert_eq!(json["checks"]["tts"]["status"], "ok");
}

#[tokio::test]
async fn test_text_conversation() {
    let app = TestApp::new(ScriptedLlm::replies(["Hello! [tone:happy]"]));

    let (status, json) = send(app.router(), text_request("hi")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Hello!");
    assert_eq!(json["tone"], "happy");
    assert_eq!(json["accent"], "american");
    assert!(json.get("audio_url").is_none());
    assert!(json.get("transcription").is_none());
}

#[tokio::test]
async fn test_text_command_skips_model() {
    let app = TestApp::new(ScriptedLlm::new([]));

    let (status, json) = send(app.router(), text_request("play music")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Opening Spotify for you...");
    assert_eq!(json["tone"], "friendly");
    assert_eq!(app.harness.llm.calls(), 0);
}

#[tokio::test]
async fn test_empty_text_is_rejected() {
    let app = TestApp::new(ScriptedLlm::new([]));

    let (status, json) = send(app.router(), text_request("   ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
    assert_eq!(app.harness.llm.calls(), 0);
}

#[tokio::test]
async fn test_model_failure_is_still_ok() {
    let app = TestApp::new(ScriptedLlm::new([common::Script::Fail("offline".to_string())]));

    let (status, json) = send(app.router(), text_request("hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["response"].as_str().unwrap().starts_with("[LLM Error]"));
    assert_eq!(json["tone"], "professional");
}

#[tokio::test]
async fn test_reply_is_spoken_to_static_dir() {
    let app = TestApp::new(ScriptedLlm::replies(["Cheers! [tone:friendly] [accent:british]"]))
        .synthesizer(FakeSynthesizer { fail: false });

    let (status, json) = send(app.router(), text_request("be british")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["audio_url"], "/static/response.mp3");
    assert_eq!(json["accent"], "british");

    let audio = std::fs::read(app.static_dir.path().join("response.mp3")).unwrap();
    assert_eq!(audio, b"ID3 friendly british Cheers!");
}

#[tokio::test]
async fn test_synthesis_failure_still_replies() {
    let app = TestApp::new(ScriptedLlm::replies(["Hi. [tone:happy]"]))
        .synthesizer(FakeSynthesizer { fail: true });

    let (status, json) = send(app.router(), text_request("hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Hi.");
    assert!(json.get("audio_url").is_none());
}

#[tokio::test]
async fn test_audio_conversation() {
    let app = TestApp::new(ScriptedLlm::new([]))
        .transcriber(FakeTranscriber(Some("what time is it")));

    let (status, json) = send(app.router(), audio_request(b"RIFF....WAVE")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transcription"], "what time is it");
    assert!(json["response"].as_str().unwrap().starts_with("The current time is"));
    assert_eq!(json["tone"], "professional");
}

#[tokio::test]
async fn test_audio_without_speech() {
    let app = TestApp::new(ScriptedLlm::new([])).transcriber(FakeTranscriber(Some("")));

    let (status, json) = send(app.router(), audio_request(b"RIFF....WAVE")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "response": "[No speech detected]" }));
    assert_eq!(app.harness.llm.calls(), 0);
}

#[tokio::test]
async fn test_empty_audio_is_rejected() {
    let app = TestApp::new(ScriptedLlm::new([])).transcriber(FakeTranscriber(Some("hi")));

    let (status, json) = send(app.router(), audio_request(b"")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_audio_without_transcriber() {
    let app = TestApp::new(ScriptedLlm::new([]));

    let (status, json) = send(app.router(), audio_request(b"RIFF....WAVE")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "not_configured");
}

#[tokio::test]
async fn test_transcription_failure() {
    let app = TestApp::new(ScriptedLlm::new([])).transcriber(FakeTranscriber(None));

    let (status, json) = send(app.router(), audio_request(b"RIFF....WAVE")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "transcription_failed");
    assert!(json["error"]["message"].as_str().unwrap().contains("decoder crashed"));
}

#[tokio::test]
async fn test_index_page_is_served() {
    let app = TestApp::new(ScriptedLlm::new([]));
    std::fs::write(app.static_dir.path().join("index.html"), "<h1>SARA</h1>").unwrap();

    let response = app
        .router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"<h1>SARA</h1>");
}
