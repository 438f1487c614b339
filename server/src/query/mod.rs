//! Filter and sort pipeline over a snapshot of the event collection.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::{Event, EventType, UnknownEventType};

/// Event type constraint. `All` disables the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventType),
}

impl TypeFilter {
    fn matches(&self, event: &Event) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => event.event_type == *t,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(TypeFilter::All)
        } else {
            s.parse().map(TypeFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub keyword: String,
    pub date: Option<NaiveDate>,
    pub event_type: TypeFilter,
}

impl EventQuery {
    fn matches(&self, keyword: &str, event: &Event) -> bool {
        let keyword_ok = keyword.is_empty()
            || event.name.to_lowercase().contains(keyword)
            || event.description.to_lowercase().contains(keyword);

        // Calendar days compare in UTC, the zone event dates are stored in.
        let date_ok = self
            .date
            .map_or(true, |day| event.date.date_naive() == day);

        keyword_ok && date_ok && self.event_type.matches(event)
    }
}

/// Events matching every criterion of `query`, earliest first.
///
/// Events on the same instant keep their relative order from `events`.
pub fn query_events(events: &[Event], query: &EventQuery) -> Vec<Event> {
    let keyword = query.keyword.trim().to_lowercase();

    let mut matched: Vec<Event> = events
        .iter()
        .filter(|event| query.matches(&keyword, event))
        .cloned()
        .collect();

    // sort_by_key is stable
    matched.sort_by_key(|event| event.date);
    matched
}
