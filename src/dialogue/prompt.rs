//! Prompt assembly for the conversational path

use std::fmt::Write as _;

use super::history::{ConversationHistory, Role};
use crate::reply::{Accent, Tone};

/// Default assistant persona name
pub const DEFAULT_ASSISTANT_NAME: &str = "SARA";

/// Build the fixed system instructions for the given persona name
///
/// The instructions carry the output contract the marker parser relies on:
/// at most five sentences, a tone marker on every reply, an accent marker
/// only when the user asks for one.
#[must_use]
pub fn system_instructions(name: &str) -> String {
    let tones: Vec<String> = Tone::ALL.iter().map(|t| format!("[tone:{t}]")).collect();
    let accents: Vec<String> = Accent::ALL.iter().map(|a| format!("[accent:{a}]")).collect();

    format!(
        "You are {name} (Smart Audio-Recognition Assistant), a voice assistant who can speak \
         in four accents and change the tone of your voice. Keep responses to 5 sentences max.\n\
         Always end your reply with exactly one tone marker. Add an accent marker only when \
         the user explicitly asks for a different accent. Markers are removed before the user \
         sees the reply, so never mention them in the text.\n\
         Markers:\n \
         • Tone: {}\n \
         • Accent (when requested): {}\n\
         Examples:\n \
         User: I lost my job -> [tone:sad]\n \
         User: Switch to British accent -> [accent:british]\n \
         User: Got promoted! -> [tone:happy]\n\
         Now respond:\n",
        tones.join(", "),
        accents.join(", "),
    )
}

/// Build the full prompt: instructions, history oldest first, then the new utterance
#[must_use]
pub fn build_prompt(
    instructions: &str,
    name: &str,
    history: &ConversationHistory,
    utterance: &str,
) -> String {
    let mut prompt = String::from(instructions);

    for turn in history.iter() {
        let speaker = match turn.role() {
            Role::User => "User",
            Role::Assistant => name,
        };
        let _ = writeln!(prompt, "{speaker}: {}", turn.text());
    }

    let _ = write!(prompt, "User: {utterance}\n{name}:");
    prompt
}
