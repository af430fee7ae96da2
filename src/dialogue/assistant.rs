//! Turn orchestration: built-in commands first, then the language model

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::history::{ConversationHistory, DEFAULT_HISTORY_TURNS, Turn};
use super::markers;
use super::prompt::{DEFAULT_ASSISTANT_NAME, build_prompt, system_instructions};
use super::trim::{DEFAULT_MAX_SENTENCES, trim_reply};
use crate::commands::CommandRouter;
use crate::llm::LanguageModel;
use crate::reply::{Accent, ReplyEnvelope};

/// Reply text when the model returns no candidate
pub const NO_OUTPUT_REPLY: &str = "[No output provided]";

/// Default bound on a single model call
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(10);

/// State carried across turns
#[derive(Debug)]
struct Session {
    history: ConversationHistory,
    accent: Accent,
}

impl Session {
    fn new(history_turns: usize) -> Self {
        Self {
            history: ConversationHistory::with_capacity(history_turns),
            accent: Accent::default(),
        }
    }
}

/// Outcome of one model call, before it becomes a reply
enum Generation {
    Text(String),
    NoOutput,
    Failed(String),
}

/// The dialogue orchestrator
///
/// One `Assistant` owns one conversation. Turns are serialized: the session
/// lock is held from the moment history is read to build the prompt until the
/// turn's result has been appended, so concurrent callers observe whole turns.
pub struct Assistant {
    router: CommandRouter,
    llm: Arc<dyn LanguageModel>,
    session: Mutex<Session>,
    name: String,
    instructions: String,
    max_sentences: usize,
    llm_timeout: Duration,
}

impl Assistant {
    /// Create an assistant with default persona, history size and limits
    #[must_use]
    pub fn new(router: CommandRouter, llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            router,
            llm,
            session: Mutex::new(Session::new(DEFAULT_HISTORY_TURNS)),
            name: DEFAULT_ASSISTANT_NAME.to_string(),
            instructions: system_instructions(DEFAULT_ASSISTANT_NAME),
            max_sentences: DEFAULT_MAX_SENTENCES,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    /// Set the persona name used in the prompt
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.instructions = system_instructions(&self.name);
        self
    }

    /// Set how many turns of history are kept
    #[must_use]
    pub fn history_turns(self, turns: usize) -> Self {
        Self {
            session: Mutex::new(Session::new(turns)),
            ..self
        }
    }

    /// Set the sentence limit applied to model replies
    #[must_use]
    pub const fn max_sentences(mut self, max: usize) -> Self {
        self.max_sentences = max;
        self
    }

    /// Set the bound on a single model call
    #[must_use]
    pub const fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }

    /// Persona name
    #[must_use]
    pub fn persona_name(&self) -> &str {
        &self.name
    }

    /// Handle one utterance and produce the reply
    ///
    /// Never fails: collaborator errors become a degraded reply in the
    /// professional tone with the current session accent.
    pub async fn converse(&self, utterance: &str) -> ReplyEnvelope {
        let mut session = self.session.lock().await;

        if let Some(reply) = self.router.route(utterance, session.accent).await {
            session.history.record_exchange(utterance, reply.text.clone());
            return reply;
        }

        let prompt = build_prompt(&self.instructions, &self.name, &session.history, utterance);
        tracing::debug!(
            history = session.history.len(),
            prompt_len = prompt.len(),
            "querying language model"
        );

        let raw = match self.generate(&prompt).await {
            Generation::Text(raw) => raw,
            Generation::NoOutput => {
                tracing::warn!("language model returned no output");
                return ReplyEnvelope::professional(NO_OUTPUT_REPLY, session.accent);
            }
            Generation::Failed(reason) => {
                tracing::error!(error = %reason, "language model call failed");
                return ReplyEnvelope::professional(format!("[LLM Error] {reason}"), session.accent);
            }
        };

        let parsed = markers::parse(&raw);
        if let Some(accent) = parsed.accent {
            if accent != session.accent {
                tracing::info!(from = %session.accent, to = %accent, "accent changed");
            }
            session.accent = accent;
        }

        let tone = parsed.tone.unwrap_or_default();
        let text = trim_reply(&parsed.text, self.max_sentences);
        session.history.record_exchange(utterance, text.clone());

        tracing::debug!(tone = %tone, accent = %session.accent, "reply ready");
        ReplyEnvelope::new(text, tone, session.accent)
    }

    async fn generate(&self, prompt: &str) -> Generation {
        match tokio::time::timeout(self.llm_timeout, self.llm.generate(prompt)).await {
            Ok(Ok(Some(text))) if !text.trim().is_empty() => Generation::Text(text),
            Ok(Ok(_)) => Generation::NoOutput,
            Ok(Err(e)) => Generation::Failed(e.to_string()),
            Err(_) => Generation::Failed(format!(
                "request timed out after {}s",
                self.llm_timeout.as_secs()
            )),
        }
    }

    /// Forget the conversation and return to the default accent
    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        session.history.clear();
        session.accent = Accent::default();
        tracing::info!("session reset");
    }

    /// Snapshot of the stored turns, oldest first
    pub async fn history(&self) -> Vec<Turn> {
        self.session.lock().await.history.iter().cloned().collect()
    }

    /// Current session accent
    pub async fn accent(&self) -> Accent {
        self.session.lock().await.accent
    }
}
