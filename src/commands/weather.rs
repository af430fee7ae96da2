//! "weather in <place>": current conditions

use std::sync::LazyLock;

use regex::Regex;

use super::{Intent, Utterance, resolve_place};
use crate::integrations::WeatherProvider;
use crate::reply::{Accent, ReplyEnvelope};

static LOCATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"weather in\s+([a-z\s]+)").expect("valid regex"));

/// Everything from the first "now"/"today" onwards is dropped
static NOISE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:now|today)\b.*$").expect("valid regex"));

pub(super) fn matches(utterance: &Utterance<'_>) -> Option<Intent> {
    let text = utterance.normalized();
    if !text.contains("weather in") {
        return None;
    }

    let location = LOCATION_REGEX.captures(text).and_then(|caps| {
        let place = NOISE_REGEX.replace(&caps[1], "");
        let place = place.split_whitespace().collect::<Vec<_>>().join(" ");
        (!place.is_empty()).then_some(place)
    });

    Some(Intent::Weather { location })
}

pub(super) async fn run(
    provider: Option<&dyn WeatherProvider>,
    location: Option<&str>,
    accent: Accent,
) -> ReplyEnvelope {
    let Some(location) = location else {
        return ReplyEnvelope::professional("Specify location (e.g., 'weather in London').", accent);
    };

    let city = resolve_place(location);
    let Some(provider) = provider else {
        tracing::warn!("weather requested but no provider configured");
        return ReplyEnvelope::professional(format!("Weather unavailable for {city}."), accent);
    };

    match provider.current_weather(&city).await {
        Ok(report) => ReplyEnvelope::professional(
            format!(
                "Weather in {city}: {}, {}°C.",
                report.description, report.temp_celsius
            ),
            accent,
        ),
        Err(e) => {
            tracing::warn!(error = %e, city = %city, "weather lookup failed");
            ReplyEnvelope::professional(format!("Weather unavailable for {city}."), accent)
        }
    }
}
