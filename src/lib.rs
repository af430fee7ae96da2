//! SARA Gateway - conversational voice assistant core
//!
//! An utterance is either a built-in command handled locally (web search,
//! time, notes, music, weather) or a conversational turn answered by a
//! language model. Either way the result is a [`ReplyEnvelope`]: reply text
//! plus the tone and accent used to voice it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │         HTTP API  (/api/text, /api/audio)           │
//! │              STT ──▶          ──▶ TTS               │
//! └────────────────────┬────────────────────────────────┘
//!                      │ converse()
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Assistant                         │
//! │   CommandRouter  │  history + accent  │  markers    │
//! └───────┬──────────────────────────────────┬──────────┘
//!         │                                  │
//! ┌───────▼────────────────────┐   ┌─────────▼──────────┐
//! │ Launcher │ Clock │ Geocoder │   │  LanguageModel     │
//! │ Weather  │ note log         │   │  (Gemini)          │
//! └────────────────────────────┘   └────────────────────┘
//! ```

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod daemon;
pub mod dialogue;
pub mod error;
pub mod integrations;
pub mod llm;
pub mod platform;
pub mod reply;
pub mod voice;

pub use clock::{Clock, SystemClock};
pub use commands::{CommandRouter, Intent, parse_intent};
pub use config::Config;
pub use daemon::Daemon;
pub use dialogue::Assistant;
pub use error::{Error, Result};
pub use llm::{GeminiClient, LanguageModel};
pub use platform::{LaunchStep, Launcher, Platform, SystemLauncher};
pub use reply::{Accent, ReplyEnvelope, Tone};
