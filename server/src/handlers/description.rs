use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{DescriptionFacts, EventType, GeneratedDescription};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub const MISSING_FACTS_MESSAGE: &str =
    "Please fill in Event Name, Type, Date, and Location before generating a description.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDescriptionRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub theme: Option<String>,
    pub target_audience: Option<String>,
    pub key_speakers: Option<String>,
    pub event_details: Option<String>,
}

impl GenerateDescriptionRequest {
    pub fn into_facts(self) -> Result<DescriptionFacts, AppError> {
        let missing = || AppError::ValidationError(MISSING_FACTS_MESSAGE.to_string());

        let name = self.name.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
        let location = self
            .location
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(missing)?;
        let event_type = self.event_type.ok_or_else(missing)?;
        let date = self.date.ok_or_else(missing)?;

        Ok(DescriptionFacts::new(
            &name,
            event_type,
            date,
            &location,
            self.theme.as_deref(),
            self.target_audience.as_deref(),
        )
        .with_key_speakers(self.key_speakers.as_deref())
        .with_event_details(self.event_details.as_deref()))
    }
}

/// Generates a description for the given facts. The store is never touched:
/// the client decides whether to use the text in a create request.
pub async fn generate_description(
    State(state): State<AppState>,
    payload: Result<Json<GenerateDescriptionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let facts = request.into_facts()?;

    let description = state.generator.generate(&facts).await?;
    tracing::info!(event = %facts.event_name, "Event description generated");

    Ok(success(
        GeneratedDescription { description },
        "The AI-powered description has been added.",
    ))
}
