//! Event listing, detail, creation and RSVP endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::parse_event_id;
use crate::models::{Event, EventDraft, EventType, RsvpStatus};
use crate::query::{query_events, EventQuery, TypeFilter};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsParams {
    pub keyword: Option<String>,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// `all` or an event type name.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl TryFrom<ListEventsParams> for EventQuery {
    type Error = AppError;

    fn try_from(params: ListEventsParams) -> Result<Self, Self::Error> {
        let date = match non_empty(params.date) {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                AppError::ValidationError(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
            })?),
            None => None,
        };

        let event_type = match non_empty(params.event_type) {
            Some(raw) => raw
                .parse::<TypeFilter>()
                .map_err(|e| AppError::ValidationError(e.to_string()))?,
            None => TypeFilter::All,
        };

        Ok(EventQuery {
            keyword: params.keyword.unwrap_or_default(),
            date,
            event_type,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Serialize)]
pub struct EventList {
    pub count: usize,
    pub events: Vec<Event>,
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Result<Response, AppError> {
    let query = EventQuery::try_from(params)?;
    let events = query_events(&state.store.events(), &query);

    tracing::debug!(?query, matched = events.len(), "Listing events");

    Ok(success(
        EventList {
            count: events.len(),
            events,
        },
        "Events retrieved",
    ))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_event_id(&id)?;
    let event = state
        .store
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", id)))?;

    Ok(success(event, "Event retrieved"))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 3, message = "Event name must be at least 3 characters."))]
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[validate(required(message = "A date is required."))]
    pub date: Option<DateTime<Utc>>,
    #[validate(length(min = 3, message = "Location is required."))]
    pub location: String,
    #[validate(length(min = 2, message = "Organizer name is required."))]
    pub organizer: String,
    #[validate(length(min = 20, message = "Description must be at least 20 characters."))]
    pub description: String,
    #[validate(url(message = "Please enter a valid image URL."))]
    pub image_url: Option<String>,
}

impl CreateEventRequest {
    /// Checks the request and turns it into a draft. An empty image URL
    /// counts as no image.
    pub fn into_draft(mut self, today: NaiveDate) -> Result<EventDraft, AppError> {
        self.image_url = non_empty(self.image_url);
        self.validate()?;

        let date = self
            .date
            .ok_or_else(|| AppError::ValidationError("A date is required.".to_string()))?;
        // Later today is still allowed; only earlier calendar days are rejected.
        if date.date_naive() < today {
            return Err(AppError::ValidationError(
                "Event date cannot be in the past.".to_string(),
            ));
        }

        Ok(EventDraft {
            name: self.name,
            event_type: self.event_type,
            date,
            location: self.location,
            description: self.description,
            image_url: self.image_url,
            organizer: self.organizer,
        })
    }
}

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let draft = request.into_draft(Utc::now().date_naive())?;

    let event = state.store.create_event(draft);
    let message = format!("{} has been successfully created.", event.name);

    Ok(created(event, message))
}

#[derive(Debug, Deserialize)]
pub struct SetRsvpRequest {
    pub status: Option<RsvpStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRsvpRequest {
    pub status: RsvpStatus,
}

/// Sets the RSVP status directly; `null` clears it.
pub async fn set_rsvp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SetRsvpRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = parse_event_id(&id)?;
    let Json(request) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let event = state
        .store
        .update_rsvp(id, request.status)
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", id)))?;

    Ok(success(event, "RSVP updated"))
}

/// Selects a status, or clears it when it is already the active one.
pub async fn toggle_rsvp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ToggleRsvpRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = parse_event_id(&id)?;
    let Json(request) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let event = state
        .store
        .toggle_rsvp(id, request.status)
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", id)))?;

    Ok(success(event, "RSVP updated"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> CreateEventRequest {
        CreateEventRequest {
            name: "Rust Meetup".to_string(),
            event_type: EventType::Meetup,
            date: Some(Utc.with_ymd_and_hms(2030, 5, 1, 18, 0, 0).unwrap()),
            location: "Room 101".to_string(),
            organizer: "Rustaceans".to_string(),
            description: "Talks about ownership and borrowing.".to_string(),
            image_url: Some(String::new()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    #[test]
    fn test_valid_request_becomes_draft() {
        let draft = request().into_draft(today()).unwrap();
        assert_eq!(draft.name, "Rust Meetup");
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn test_short_fields_are_rejected_with_messages() {
        let mut req = request();
        req.name = "Ru".to_string();
        req.description = "Too short".to_string();

        match req.into_draft(today()) {
            Err(AppError::ValidationError(msg)) => {
                assert!(msg.contains("Event name must be at least 3 characters."));
                assert!(msg.contains("Description must be at least 20 characters."));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_date_and_bad_url_are_rejected() {
        let mut req = request();
        req.date = None;
        req.image_url = Some("not a url".to_string());

        match req.into_draft(today()) {
            Err(AppError::ValidationError(msg)) => {
                assert!(msg.contains("A date is required."));
                assert!(msg.contains("Please enter a valid image URL."));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_past_date_is_rejected() {
        let mut req = request();
        req.date = Some(Utc.with_ymd_and_hms(2024, 8, 10, 10, 0, 0).unwrap());
        assert!(matches!(
            req.into_draft(today()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_later_today_is_accepted() {
        let mut req = request();
        req.date = Some(Utc.with_ymd_and_hms(2026, 10, 15, 0, 0, 0).unwrap());
        assert!(req.into_draft(today()).is_ok());

        let mut req = request();
        req.date = Some(Utc.with_ymd_and_hms(2026, 10, 14, 23, 59, 59).unwrap());
        assert!(req.into_draft(today()).is_err());
    }

    #[test]
    fn test_list_params_parse() {
        let query = EventQuery::try_from(ListEventsParams {
            keyword: Some("tech".to_string()),
            date: Some("2024-08-10".to_string()),
            event_type: Some("all".to_string()),
        })
        .unwrap();
        assert_eq!(query.keyword, "tech");
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 8, 10));
        assert_eq!(query.event_type, TypeFilter::All);

        let empty = EventQuery::try_from(ListEventsParams {
            date: Some(String::new()),
            event_type: Some(" ".to_string()),
            ..ListEventsParams::default()
        })
        .unwrap();
        assert_eq!(empty, EventQuery::default());

        assert!(EventQuery::try_from(ListEventsParams {
            date: Some("10/08/2024".to_string()),
            ..ListEventsParams::default()
        })
        .is_err());
        assert!(EventQuery::try_from(ListEventsParams {
            event_type: Some("Concert".to_string()),
            ..ListEventsParams::default()
        })
        .is_err());
    }
}
