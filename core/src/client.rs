use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::CineConfig;
use crate::errors::{GenerationError, GenerationResult};
use crate::types::*;

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> GenerationResult;
}

/// Client for interacting with the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// Construction failure is kept and reported on every call.
    http: Result<Client, GenerationError>,
    config: CineConfig,
}

impl GeminiClient {
    /// Create a new Gemini API client.
    ///
    /// Never fails: a missing credential or an HTTP stack that could not be
    /// built is reported by [`GeminiClient::generate_text`] instead.
    pub fn new(config: CineConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(|e| {
            warn!("Failed to initialize HTTP client: {}", e);
            GenerationError::MissingDependency(format!(
                "el cliente HTTP no está disponible: {}",
                e
            ))
        });

        Self { http, config }
    }

    /// Get the generateContent endpoint for the configured model
    fn get_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base_url(),
            self.config.model_name()
        )
    }

    fn generation_config(&self) -> Option<GenerationConfig> {
        self.config.temperature.map(|temperature| GenerationConfig {
            temperature: Some(temperature),
        })
    }

    /// Generate content using the Gemini API
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let http = self.http.as_ref().map_err(Clone::clone)?;

        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            GenerationError::Configuration(format!(
                "no API key configured; set the {} environment variable",
                crate::config::API_KEY_ENV
            ))
        })?;

        let url = self.get_endpoint();
        debug!(%url, "Sending generateContent request");

        let response = http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                GenerationError::MalformedResponse(format!("Failed to read error response: {}", e))
            })?;

            return Err(GenerationError::Http {
                status_code: status.as_u16(),
                message: format!("API request failed: {}", api_error_message(&error_body)),
            });
        }

        let response_body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                GenerationError::MalformedResponse(format!("Failed to parse response: {}", e))
            })?;

        Ok(response_body)
    }

    /// One single-turn request; the first candidate's text comes back verbatim.
    pub async fn generate_text(&self, prompt: &str) -> GenerationResult {
        info!(prompt_len = prompt.len(), model = self.config.model_name(), "Generating text");

        let request = GenerateContentRequest::single_turn(prompt, self.generation_config());
        let result = match self.generate_content(&request).await {
            Ok(response) => extract_text_from_response(&response),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!(transient = e.is_transient(), "Generation failed: {}", e);
        }
        result
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> GenerationResult {
        GeminiClient::generate_text(self, prompt).await
    }
}

fn classify_send_error(e: reqwest::Error) -> GenerationError {
    if e.is_builder() {
        GenerationError::Configuration(format!("Invalid request: {}", e))
    } else {
        GenerationError::Transport(format!("Failed to send request: {}", e))
    }
}

/// The API's own message and status name, or the raw body when it is not the
/// usual error envelope.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(status) => format!("{} ({})", parsed.error.message, status),
            None => parsed.error.message,
        },
        Err(_) => body.to_string(),
    }
}

/// Concatenates the text parts of the first candidate.
pub fn extract_text_from_response(response: &GenerateContentResponse) -> GenerationResult {
    let candidate = response.candidates.first().ok_or_else(|| {
        GenerationError::MalformedResponse("No candidates in response".to_string())
    })?;

    let content = candidate
        .content
        .as_ref()
        .ok_or_else(|| GenerationError::MalformedResponse("No content in candidate".to_string()))?;

    let texts: Vec<&str> = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    if texts.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "No text in response".to_string(),
        ));
    }

    Ok(texts.concat())
}
