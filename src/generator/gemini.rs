// src/generator/gemini.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use super::{NO_QUESTIONS, QuestionGenerator};
use crate::{config::Config, error::AppError};

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        // `join` replaces the last segment unless the base ends in `/`.
        let mut base = config.gemini_base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut endpoint = base
            .join(&format!("v1beta/models/{}:generateContent", config.gemini_model))
            .map_err(|e| AppError::InternalServerError(format!("Invalid Gemini endpoint: {}", e)))?;
        endpoint
            .query_pairs_mut()
            .append_pair("key", &config.gemini_api_key);

        Ok(Self { client, endpoint })
    }
}

/// Pulls the generated content out of a `generateContent` response body.
/// Any other shape yields the "no questions" placeholder.
pub fn extract_content(body: &Value) -> Value {
    match body.pointer("/candidates/0/content") {
        Some(content) if !content.is_null() => content.clone(),
        _ => Value::String(NO_QUESTIONS.to_string()),
    }
}

#[async_trait]
impl QuestionGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Value, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Gemini answered with status {}", status);
        }

        let body: Value = response.json().await?;
        let content = extract_content(&body);
        if content == Value::String(NO_QUESTIONS.to_string()) {
            tracing::warn!("Gemini response had no candidates");
        }
        Ok(content)
    }
}
