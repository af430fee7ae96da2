//! Local time, optionally at a named place

use std::sync::LazyLock;

use regex::Regex;

use super::{Intent, Utterance, resolve_place};
use crate::clock::{Clock, format_12h};
use crate::integrations::TimezoneResolver;
use crate::reply::{Accent, ReplyEnvelope};
use crate::{Error, Result};

static TRIGGER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:what(?:['’]s| is) the time|what time is it|current time|time in)\b")
        .expect("valid regex")
});

static LOCATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time in ([a-z\s]+)").expect("valid regex"));

static NOISE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:now|today)\b").expect("valid regex"));

pub(super) fn matches(utterance: &Utterance<'_>) -> Option<Intent> {
    let text = utterance.normalized();
    if !TRIGGER_REGEX.is_match(text) {
        return None;
    }

    let location = LOCATION_REGEX.captures(text).and_then(|caps| {
        let place = NOISE_REGEX.replace_all(&caps[1], " ");
        let place = place.split_whitespace().collect::<Vec<_>>().join(" ");
        (!place.is_empty()).then_some(place)
    });

    Some(Intent::Time { location })
}

pub(super) async fn run(
    clock: &dyn Clock,
    timezones: Option<&dyn TimezoneResolver>,
    location: Option<&str>,
    accent: Accent,
) -> ReplyEnvelope {
    let Some(location) = location else {
        let now = format_12h(&clock.now_local());
        return ReplyEnvelope::professional(format!("The current time is {now}."), accent);
    };

    let city = resolve_place(location);
    match lookup(clock, timezones, &city).await {
        Ok((zone_city, time)) => ReplyEnvelope::professional(
            format!("The current time in {zone_city} is {time}."),
            accent,
        ),
        Err(e) => {
            // Fall back to the host's own clock under the requested name
            tracing::warn!(error = %e, city = %city, "timezone lookup failed");
            let now = format_12h(&clock.now_local());
            ReplyEnvelope::professional(format!("The current time in {city} is {now}."), accent)
        }
    }
}

async fn lookup(
    clock: &dyn Clock,
    timezones: Option<&dyn TimezoneResolver>,
    city: &str,
) -> Result<(String, String)> {
    let resolver =
        timezones.ok_or_else(|| Error::Geocoding("no timezone resolver configured".to_string()))?;
    let zone = resolver.resolve_timezone(city).await?;

    let local = clock.now_utc().with_timezone(&zone).naive_local();
    let name = zone.name();
    let zone_city = name.rsplit('/').next().unwrap_or(name).replace('_', " ");

    Ok((zone_city, format_12h(&local)))
}
