//! Hosted LLM client
//!
//! Thin blocking wrapper over the Gemini `generateContent` endpoint. The
//! gateway carries no intelligence of its own: it sends a prompt, asks for
//! a JSON response, and deserializes the model's structured output into the
//! caller's schema. All parsing and categorization smarts live on the
//! hosted side.

use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::GatewaySettings;
use crate::error::{BudgetError, BudgetResult};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the hosted model API
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key
    pub fn new(api_key: String, settings: &GatewaySettings) -> BudgetResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BudgetError::Gateway(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client reading the API key from the environment
    pub fn from_env(settings: &GatewaySettings) -> BudgetResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            BudgetError::Config(format!(
                "{} is not set; AI features need an API key",
                API_KEY_ENV
            ))
        })?;
        Self::new(api_key, settings)
    }

    /// Send a prompt in JSON-response mode and deserialize the model's
    /// structured output into `T`
    pub fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> BudgetResult<T> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| BudgetError::Gateway(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(BudgetError::Gateway(format!(
                "Model API returned {}: {}",
                status, detail
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| BudgetError::Gateway(format!("Malformed API response: {}", e)))?;

        let text = first_candidate_text(&parsed)?;
        serde_json::from_str(text).map_err(|e| {
            BudgetError::Gateway(format!("Model output did not match the expected schema: {}", e))
        })
    }
}

/// Pull the text of the first candidate out of a generate response
fn first_candidate_text(response: &GenerateResponse) -> BudgetResult<&str> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.as_str())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| BudgetError::Gateway("Model returned no candidates".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"expenses\": []}"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            first_candidate_text(&response).unwrap(),
            "{\"expenses\": []}"
        );
    }

    #[test]
    fn test_empty_candidates_is_error() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(first_candidate_text(&response).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }
}
