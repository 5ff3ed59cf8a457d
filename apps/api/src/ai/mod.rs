/// AI Content Gateway — the single point of entry for generated content.
/// No other module may call the text-generation endpoint directly.
///
/// Two implementations exist behind one trait: a live Gemini client and a
/// deterministic template generator. Which one runs is an explicit startup
/// choice (`AI_MODE`), selected once in `main` and injected via AppState.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod bootstrap;
pub mod gemini;
pub mod handlers;
pub mod prompts;
pub mod template;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Generator returned empty content")]
    EmptyContent,
}

/// Structured draft returned by the full-portfolio request. Held only in
/// caller state until explicitly saved. Fields default individually: a
/// syntactically valid but incomplete response propagates as-is rather
/// than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioDraft {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectDraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Professional bio under 120 words.
    async fn generate_bio(
        &self,
        name: &str,
        role: &str,
        skills: &[String],
    ) -> Result<String, AiError>;

    /// Project description under 100 words.
    async fn generate_project_description(
        &self,
        title: &str,
        tags: &[String],
    ) -> Result<String, AiError>;

    /// Up to 10 skill names for a role.
    async fn suggest_skills(&self, role: &str) -> Result<Vec<String>, AiError>;

    /// Full portfolio draft: bio + skills + 3 projects.
    async fn generate_portfolio(&self, name: &str, role: &str) -> Result<PortfolioDraft, AiError>;
}

/// First top-level JSON object in a text: first `{` through last `}`.
/// Models often wrap the payload in prose; this strips it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

/// Parses the full-portfolio response text into a draft. A response with
/// no JSON object or an unparsable one is a generation failure, never a
/// panic.
pub fn parse_portfolio_draft(text: &str) -> Result<PortfolioDraft, AiError> {
    let json = extract_json_object(text)
        .ok_or_else(|| AiError::Parse("no JSON object in response".to_string()))?;
    serde_json::from_str(json).map_err(|e| AiError::Parse(e.to_string()))
}

/// Splits a comma-separated response line into at most `max` skill names.
pub fn parse_skill_list(text: &str, max: usize) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_with_surrounding_prose() {
        let text = r#"Here is your data: {"bio":"x","skills":["a"],"projects":[]} Thanks!"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"bio":"x","skills":["a"],"projects":[]}"#)
        );
    }

    #[test]
    fn test_extract_json_object_no_braces() {
        assert_eq!(extract_json_object("no json here"), None);
    }

    #[test]
    fn test_extract_json_object_spans_nested_braces() {
        let text = r#"ok {"a": {"b": 1}} done"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn test_parse_portfolio_draft_from_wrapped_response() {
        let text = r#"Here is your data: {"bio":"x","skills":["a"],"projects":[]} Thanks!"#;
        let draft = parse_portfolio_draft(text).unwrap();
        assert_eq!(draft.bio, "x");
        assert_eq!(draft.skills, vec!["a"]);
        assert!(draft.projects.is_empty());
    }

    #[test]
    fn test_parse_portfolio_draft_without_json_fails() {
        let result = parse_portfolio_draft("Sorry, I cannot help with that.");
        assert!(matches!(result, Err(AiError::Parse(_))));
    }

    #[test]
    fn test_parse_portfolio_draft_with_invalid_json_fails() {
        let result = parse_portfolio_draft(r#"{"bio": unterminated"#);
        assert!(matches!(result, Err(AiError::Parse(_))));
    }

    #[test]
    fn test_incomplete_but_valid_json_propagates() {
        // Missing fields default rather than fail — shape is not validated.
        let draft = parse_portfolio_draft(r#"{"skills":["a","b"]}"#).unwrap();
        assert!(draft.bio.is_empty());
        assert_eq!(draft.skills.len(), 2);
    }

    #[test]
    fn test_parse_skill_list_trims_and_caps() {
        let skills = parse_skill_list("React, TypeScript , , Node.js", 10);
        assert_eq!(skills, vec!["React", "TypeScript", "Node.js"]);

        let many = (0..15).map(|i| format!("s{i}")).collect::<Vec<_>>().join(",");
        assert_eq!(parse_skill_list(&many, 10).len(), 10);
    }

    #[test]
    fn test_project_draft_deserializes_without_tags() {
        let draft: ProjectDraft =
            serde_json::from_str(r#"{"title": "T", "description": "D"}"#).unwrap();
        assert!(draft.tags.is_empty());
    }
}
