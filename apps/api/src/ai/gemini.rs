//! Live generator backed by the hosted Gemini `generateContent` endpoint.
//! The API key is server configuration only; it never reaches a client.
//!
//! One request, one response: no retry, no backoff, no streaming, no
//! caching. A duplicate trigger produces a duplicate upstream call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::prompts;
use crate::ai::{
    parse_portfolio_draft, parse_skill_list, AiError, ContentGenerator, PortfolioDraft,
};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls.
pub const MODEL: &str = "gemini-pro";
const MAX_SKILL_SUGGESTIONS: usize = 10;

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
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
    text: String,
}

impl GeminiResponse {
    /// Text of the first candidate's first part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .first()
            .map(|p| p.text.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn call(&self, prompt: &str) -> Result<String, AiError> {
        let request_body = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_URL}/{MODEL}:generateContent?key={}", self.api_key);

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = response.json().await?;
        let text = parsed.text().ok_or(AiError::EmptyContent)?;

        debug!("Gemini call succeeded ({} chars)", text.len());
        Ok(text.to_string())
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_bio(
        &self,
        name: &str,
        role: &str,
        skills: &[String],
    ) -> Result<String, AiError> {
        self.call(&prompts::bio_prompt(name, role, skills)).await
    }

    async fn generate_project_description(
        &self,
        title: &str,
        tags: &[String],
    ) -> Result<String, AiError> {
        self.call(&prompts::project_description_prompt(title, tags))
            .await
    }

    async fn suggest_skills(&self, role: &str) -> Result<Vec<String>, AiError> {
        let text = self.call(&prompts::skill_suggestions_prompt(role)).await?;
        Ok(parse_skill_list(&text, MAX_SKILL_SUGGESTIONS))
    }

    async fn generate_portfolio(&self, name: &str, role: &str) -> Result<PortfolioDraft, AiError> {
        let text = self.call(&prompts::portfolio_prompt(name, role)).await?;
        parse_portfolio_draft(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "Hello there" }], "role": "model" } }
            ],
            "promptFeedback": {}
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("Hello there"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_error_body_parse() {
        let json = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hi" }],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    }
}
