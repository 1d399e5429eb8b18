use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Serialize;

use crate::errors::ProviderError;
use crate::providers::SpeechSynthesisService;

/// Client for an OpenAI-compatible speech synthesis API.
///
/// Self-hosted TTS bridges accept the same `/audio/speech` request shape; the
/// extra `language` field steers voices on servers that support it and is
/// ignored elsewhere.
#[derive(Debug)]
pub struct SpeechApi {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL, up to and including the version segment
    endpoint: String,
    /// API key for authentication (may be empty for local servers)
    api_key: String,
    /// Model to synthesize with
    model: String,
    /// Voice identifier
    voice: String,
}

/// Speech synthesis request body
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    /// The model to use
    model: &'a str,
    /// Text to speak
    input: &'a str,
    /// Voice identifier
    voice: &'a str,
    /// Output container format
    response_format: &'a str,
    /// Language of the input text
    language: &'a str,
}

impl SpeechApi {
    /// Create a new speech synthesis client
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            voice: voice.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesisService for SpeechApi {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> Result<(), ProviderError> {
        let api_url = format!("{}/audio/speech", self.endpoint.trim_end_matches('/'));

        let request_body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "mp3",
            language,
        };

        let mut request = self.client.post(&api_url).json(&request_body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!(
                "Failed to send request to synthesis API: {}", e
            )))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Synthesis API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::ParseError(format!(
                "Failed to read synthesis API response body: {}", e
            )))?;

        if audio_bytes.is_empty() {
            return Err(ProviderError::ParseError(
                "Synthesis API returned an empty audio payload".to_string(),
            ));
        }

        debug!("Writing {} bytes of synthesized audio to {:?}", audio_bytes.len(), output_path);

        tokio::fs::write(output_path, &audio_bytes).await.map_err(|e| {
            ProviderError::RequestFailed(format!(
                "Failed to write synthesized audio to {:?}: {}",
                output_path, e
            ))
        })?;

        Ok(())
    }
}
