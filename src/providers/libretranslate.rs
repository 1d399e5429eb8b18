use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::TranslationService;

/// Client for a LibreTranslate-compatible translation API.
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base endpoint URL
    endpoint: String,
    /// API key, empty for keyless self-hosted instances
    api_key: String,
}

/// Translation request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source language; the server detects it
    source: &'a str,
    /// Target language code
    target: &'a str,
    /// Payload format
    format: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

/// Translation response body
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslate {
    /// Create a new translation client
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TranslationService for LibreTranslate {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let api_url = format!("{}/translate", self.endpoint.trim_end_matches('/'));

        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
            api_key: &self.api_key,
        };

        let response = self
            .client
            .post(&api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!(
                "Failed to send request to translation API: {}", e
            )))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation API error ({}): {}", status, error_text);

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let translation = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!(
                "Failed to parse translation API response: {}", e
            )))?;

        Ok(translation.translated_text)
    }
}
