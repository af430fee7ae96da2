//! "play music": start a music player, falling back step by step

use std::sync::Arc;

use super::{Intent, Utterance, run_launcher};
use crate::platform::{LaunchStep, Launcher, Platform};
use crate::reply::{Accent, ReplyEnvelope, Tone};

/// Web player opened when no native player starts
pub const WEB_PLAYER_URL: &str = "https://music.youtube.com";

pub(super) fn matches(utterance: &Utterance<'_>) -> Option<Intent> {
    utterance
        .normalized()
        .contains("play music")
        .then_some(Intent::Music)
}

/// Ordered launch attempts for a platform; the web player is always last
#[must_use]
pub fn launch_plan(platform: Platform) -> Vec<LaunchStep> {
    let mut steps = match platform {
        Platform::Wsl => vec![LaunchStep::Program {
            program: "cmd.exe",
            args: vec!["/c", "start", "spotify:"],
        }],
        Platform::Windows => vec![LaunchStep::Program {
            program: "cmd",
            args: vec!["/C", "start", "spotify:"],
        }],
        Platform::MacOs => vec![LaunchStep::Program {
            program: "open",
            args: vec!["-a", "Spotify"],
        }],
        Platform::Other => vec![
            LaunchStep::Program {
                program: "spotify",
                args: Vec::new(),
            },
            LaunchStep::Program {
                program: "flatpak",
                args: vec!["run", "com.spotify.Client"],
            },
        ],
    };
    steps.push(LaunchStep::Url(WEB_PLAYER_URL));
    steps
}

pub(super) async fn run(launcher: &Arc<dyn Launcher>, accent: Accent) -> ReplyEnvelope {
    let plan = launch_plan(launcher.platform());

    for step in plan {
        let attempt = step.clone();
        match run_launcher(launcher, move |l| l.run_step(&attempt)).await {
            Ok(()) => {
                let text = match step {
                    LaunchStep::Url(_) => "Opening YouTube Music for you...",
                    LaunchStep::Program { .. } => "Opening Spotify for you...",
                };
                return ReplyEnvelope::new(text, Tone::Friendly, accent);
            }
            Err(e) => tracing::warn!(?step, error = %e, "music launch step failed"),
        }
    }

    ReplyEnvelope::new("I couldn't start a music player.", Tone::Friendly, accent)
}
