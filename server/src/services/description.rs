//! Event description generation through a large language model.
//!
//! [`DescriptionGenerator`] is the seam the HTTP layer calls. The production
//! implementation, [`LlmDescriptionGenerator`], renders the copywriting
//! prompt and sends it to an OpenAI-compatible chat completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use minijinja::{context, Environment};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::models::DescriptionFacts;

const PROMPT_TEMPLATE: &str = "\
You are an expert marketing copywriter specializing in creating event descriptions.

Based on the event details provided, generate an engaging and informative description to attract attendees.

Event Name: {{ event_name }}
Event Type: {{ event_type }}
Event Date: {{ event_date }}
Event Time: {{ event_time }}
Event Location: {{ event_location }}
Event Theme: {{ event_theme }}
Target Audience: {{ target_audience }}
Key Speakers: {% if key_speakers %}{{ key_speakers }}{% else %}N/A{% endif %}
Event Details: {% if event_details %}{{ event_details }}{% else %}N/A{% endif %}

Description:";

const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("description generation is not configured")]
    NotConfigured,

    #[error("failed to render prompt: {0}")]
    Prompt(#[from] minijinja::Error),

    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM response malformed: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    /// Generated description text for the given facts. Never empty on success.
    async fn generate(&self, facts: &DescriptionFacts) -> Result<String, GenerationError>;
}

/// Renders the copywriting prompt. Missing optional facts read `N/A`.
pub fn render_prompt(facts: &DescriptionFacts) -> Result<String, GenerationError> {
    let env = Environment::new();
    let prompt = env.render_str(
        PROMPT_TEMPLATE,
        context! {
            event_name => facts.event_name,
            event_type => facts.event_type,
            event_date => facts.event_date,
            event_time => facts.event_time,
            event_location => facts.event_location,
            event_theme => facts.event_theme,
            target_audience => facts.target_audience,
            key_speakers => facts.key_speakers,
            event_details => facts.event_details,
        },
    )?;
    Ok(prompt)
}

pub struct LlmDescriptionGenerator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmDescriptionGenerator {
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl DescriptionGenerator for LlmDescriptionGenerator {
    async fn generate(&self, facts: &DescriptionFacts) -> Result<String, GenerationError> {
        let prompt = render_prompt(facts)?;
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        debug!(model = %self.model, event = %facts.event_name, "Requesting event description");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response.json().await?;
        extract_description(&json)
    }
}

/// Stands in for the LLM backend when no API key is configured.
pub struct DisabledGenerator;

#[async_trait]
impl DescriptionGenerator for DisabledGenerator {
    async fn generate(&self, _facts: &DescriptionFacts) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

/// Generator selected by the LLM settings.
pub fn generator_from_config(
    config: &LlmConfig,
) -> Result<Box<dyn DescriptionGenerator>, GenerationError> {
    match &config.api_key {
        Some(key) => Ok(Box::new(LlmDescriptionGenerator::new(
            config.api_url.clone(),
            key.clone(),
            config.model.clone(),
            config.timeout,
        )?)),
        None => {
            warn!("LLM_API_KEY not set, description generation disabled");
            Ok(Box::new(DisabledGenerator))
        }
    }
}

fn extract_description(json: &serde_json::Value) -> Result<String, GenerationError> {
    let content = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            GenerationError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

    let description = content.trim();
    if description.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "empty description".to_string(),
        ));
    }
    Ok(description.to_string())
}
