use crate::config::toml_config::GeneratorConfig;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for a Gemini-style `generateContent` endpoint. The base endpoint is
/// injectable so tests can point it at a local mock server.
pub struct GeminiGenerator {
    config: GeneratorConfig,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let mut call = self
            .client
            .post(self.request_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request);
        if let Some(timeout) = self.config.timeout_seconds {
            call = call.timeout(Duration::from_secs(timeout));
        }

        tracing::debug!("Calling generator model: {}", self.config.model);
        let response = call.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Generator returned status {}: {}", status, body);
            return Err(PlannerError::GeneratorUnavailable {
                message: format!("status {}", status),
            });
        }

        let payload: GenerateResponse = response.json().await?;
        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PlannerError::GeneratorUnavailable {
                message: "response contained no candidate text".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn config_for(server: &MockServer) -> GeneratorConfig {
        GeneratorConfig {
            endpoint: server.base_url(),
            model: "gemini-1.5-flash".to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: Some(5),
        }
    }

    #[tokio::test]
    async fn sends_prompt_and_reads_candidate_text() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-1.5-flash:generateContent")
                .query_param("key", "test-key")
                .json_body_partial(
                    r#"{"contents": [{"parts": [{"text": "plan my trip"}]}]}"#,
                );
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "{\"days\": []}"}]}}
                    ]
                }));
        });

        let generator = GeminiGenerator::new(config_for(&server));
        let raw = generator.generate("plan my trip").await.unwrap();

        api_mock.assert();
        assert_eq!(raw, "{\"days\": []}");
    }

    #[tokio::test]
    async fn server_error_maps_to_generator_unavailable() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-1.5-flash:generateContent");
            then.status(503).body("overloaded");
        });

        let generator = GeminiGenerator::new(config_for(&server));
        let err = generator.generate("plan my trip").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, PlannerError::GeneratorUnavailable { .. }));
    }

    #[tokio::test]
    async fn empty_candidates_map_to_generator_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-1.5-flash:generateContent");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"candidates": []}));
        });

        let generator = GeminiGenerator::new(config_for(&server));
        let err = generator.generate("plan my trip").await.unwrap_err();
        assert!(matches!(err, PlannerError::GeneratorUnavailable { .. }));
    }
}
