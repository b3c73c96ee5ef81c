use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local};
use chrono_tz::Tz;

use crate::calendar::{EventRecord, RawCalendarEntry, StartDescriptor};

pub const NO_TITLE: &str = "No Title";
pub const LOCATION_TBD: &str = "TBD";
pub const ALL_DAY: &str = "All Day";
/// Shown when a start timestamp cannot be parsed.
pub const UNKNOWN_TIME: &str = "Time TBD";

const CLOCK_FORMAT: &str = "%I:%M %p";

/// Time zone that start timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Named(Tz),
}

impl DisplayZone {
    pub fn format_clock(&self, instant: DateTime<FixedOffset>) -> String {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).format(CLOCK_FORMAT).to_string(),
            DisplayZone::Named(tz) => instant.with_timezone(tz).format(CLOCK_FORMAT).to_string(),
        }
    }
}

impl FromStr for DisplayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(DisplayZone::Local);
        }
        trimmed
            .parse::<Tz>()
            .map(DisplayZone::Named)
            .map_err(|e| format!("unknown time zone '{}': {}", trimmed, e))
    }
}

/// Normalizes entries for display in the viewer's local time zone.
pub fn normalize(entries: Vec<RawCalendarEntry>) -> Vec<EventRecord> {
    normalize_in(entries, &DisplayZone::Local)
}

pub fn normalize_in(entries: Vec<RawCalendarEntry>, zone: &DisplayZone) -> Vec<EventRecord> {
    entries
        .into_iter()
        .map(|entry| normalize_entry(entry, zone))
        .collect()
}

pub fn normalize_entry(entry: RawCalendarEntry, zone: &DisplayZone) -> EventRecord {
    let time = format_start(&entry.id, &entry.start, zone);

    EventRecord {
        id: entry.id,
        title: non_empty_or(entry.summary, NO_TITLE),
        time,
        location: non_empty_or(entry.location, LOCATION_TBD),
        description: entry.description.unwrap_or_default(),
    }
}

pub fn format_start(event_id: &str, start: &StartDescriptor, zone: &DisplayZone) -> String {
    match start {
        StartDescriptor::AllDay(_) => ALL_DAY.to_string(),
        StartDescriptor::Timestamp(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => zone.format_clock(instant),
            Err(e) => {
                tracing::warn!("Event {} has unparseable start '{}': {}", event_id, raw, e);
                UNKNOWN_TIME.to_string()
            }
        },
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
