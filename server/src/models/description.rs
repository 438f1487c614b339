use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventType;

pub const DEFAULT_TARGET_AUDIENCE: &str = "General Audience";

/// Structured facts sent to the description generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionFacts {
    pub event_name: String,
    pub event_type: String,
    pub event_date: String,
    pub event_time: String,
    pub event_location: String,
    pub event_theme: String,
    pub target_audience: String,
    pub key_speakers: Option<String>,
    pub event_details: Option<String>,
}

impl DescriptionFacts {
    /// Builds the facts for an event, formatting `date` as separate
    /// human-readable date and time strings. The theme falls back to the
    /// event type and the audience to [`DEFAULT_TARGET_AUDIENCE`].
    pub fn new(
        name: &str,
        event_type: EventType,
        date: DateTime<Utc>,
        location: &str,
        theme: Option<&str>,
        target_audience: Option<&str>,
    ) -> Self {
        Self {
            event_name: name.trim().to_string(),
            event_type: event_type.to_string(),
            event_date: format_long_date(date),
            event_time: format_time(date),
            event_location: location.trim().to_string(),
            event_theme: non_blank(theme).unwrap_or(event_type.as_str()).to_string(),
            target_audience: non_blank(target_audience)
                .unwrap_or(DEFAULT_TARGET_AUDIENCE)
                .to_string(),
            key_speakers: None,
            event_details: None,
        }
    }

    pub fn with_key_speakers(mut self, speakers: Option<&str>) -> Self {
        self.key_speakers = non_blank(speakers).map(str::to_string);
        self
    }

    pub fn with_event_details(mut self, details: Option<&str>) -> Self {
        self.event_details = non_blank(details).map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDescription {
    pub description: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `August 10th, 2024`
pub fn format_long_date(date: DateTime<Utc>) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}

/// `10:00 AM`
pub fn format_time(date: DateTime<Utc>) -> String {
    date.format("%-I:%M %p").to_string()
}
