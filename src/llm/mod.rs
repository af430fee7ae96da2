//! Language model collaborator
//!
//! The dialogue orchestrator only needs `prompt -> text`. Providers report an
//! empty candidate list as `Ok(None)` rather than an error.

mod gemini;

use async_trait::async_trait;

pub use gemini::{DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL, GeminiClient};

use crate::Result;

/// Text generation backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate raw text for a prompt
    ///
    /// Returns `Ok(None)` when the provider answered but produced no output.
    ///
    /// # Errors
    ///
    /// Returns error on transport or response parsing failures
    async fn generate(&self, prompt: &str) -> Result<Option<String>>;
}
