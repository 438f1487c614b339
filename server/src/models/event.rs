use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Conference,
    Workshop,
    Meetup,
    Social,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Conference,
        EventType::Workshop,
        EventType::Meetup,
        EventType::Social,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Conference => "Conference",
            EventType::Workshop => "Workshop",
            EventType::Meetup => "Meetup",
            EventType::Social => "Social",
            EventType::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event type '{0}'")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

/// A viewer's response to an event. `None` on the event means no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Going,
    Interested,
}

impl RsvpStatus {
    /// Status that results from selecting `requested` while `current` is set.
    /// Selecting the active status again clears it.
    pub fn toggled(current: Option<RsvpStatus>, requested: RsvpStatus) -> Option<RsvpStatus> {
        if current == Some(requested) {
            None
        } else {
            Some(requested)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendees {
    pub going: u32,
    pub interested: u32,
}

impl Attendees {
    pub(crate) fn counter_mut(&mut self, status: RsvpStatus) -> &mut u32 {
        match status {
            RsvpStatus::Going => &mut self.going,
            RsvpStatus::Interested => &mut self.interested,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub organizer: String,
    pub attendees: Attendees,
    pub rsvp: Option<RsvpStatus>,
}

/// Caller-supplied fields of a new event. Store-assigned fields are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub organizer: String,
}
