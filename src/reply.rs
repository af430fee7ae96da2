//! Reply envelope shared by the command router and the dialogue orchestrator

use serde::{Deserialize, Serialize};

/// Emotional tone the synthesizer should speak a reply in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Sad,
    Happy,
    Angry,
    Flirty,
}

impl Tone {
    /// All tones, in prompt order
    pub const ALL: [Self; 6] = [
        Self::Professional,
        Self::Friendly,
        Self::Sad,
        Self::Happy,
        Self::Angry,
        Self::Flirty,
    ];

    /// Parse a lower-cased marker value
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Friendly => "friendly",
            Self::Sad => "sad",
            Self::Happy => "happy",
            Self::Angry => "angry",
            Self::Flirty => "flirty",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regional accent used to pick the synthesizer voice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    American,
    British,
    Australian,
    Indian,
}

impl Accent {
    /// All accents, in prompt order
    pub const ALL: [Self; 4] = [Self::British, Self::Australian, Self::Indian, Self::American];

    /// Parse a lower-cased marker value
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::American => "american",
            Self::British => "british",
            Self::Australian => "australian",
            Self::Indian => "indian",
        }
    }
}

impl std::fmt::Display for Accent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text, tone and accent of a single assistant reply
///
/// `text` never contains marker syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    #[serde(rename = "response")]
    pub text: String,
    pub tone: Tone,
    pub accent: Accent,
}

impl ReplyEnvelope {
    #[must_use]
    pub fn new(text: impl Into<String>, tone: Tone, accent: Accent) -> Self {
        Self {
            text: text.into(),
            tone,
            accent,
        }
    }

    /// Reply in the default professional tone
    #[must_use]
    pub fn professional(text: impl Into<String>, accent: Accent) -> Self {
        Self::new(text, Tone::Professional, accent)
    }
}
