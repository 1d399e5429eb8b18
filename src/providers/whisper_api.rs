use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, multipart};
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::{TranscriptionOutput, TranscriptionService};

/// Client for an OpenAI-compatible audio transcription API.
///
/// Works against the hosted API as well as self-hosted whisper servers that
/// expose the same `/audio/transcriptions` route.
#[derive(Debug)]
pub struct WhisperApi {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL, up to and including the version segment
    endpoint: String,
    /// API key for authentication (may be empty for local servers)
    api_key: String,
    /// Model to transcribe with
    model: String,
}

/// Transcription response in verbose_json format
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    /// The transcribed text
    text: String,
    /// Detected source language, absent on servers that don't report it
    #[serde(default)]
    language: Option<String>,
}

impl WhisperApi {
    /// Create a new transcription client
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
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
        }
    }
}

#[async_trait]
impl TranscriptionService for WhisperApi {
    async fn transcribe(&self, audio_path: &Path) -> Result<TranscriptionOutput, ProviderError> {
        let audio_bytes = tokio::fs::read(audio_path).await.map_err(|e| {
            ProviderError::RequestFailed(format!(
                "Failed to read audio file {:?}: {}",
                audio_path, e
            ))
        })?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".to_string());

        debug!("Uploading {} bytes of audio for transcription", audio_bytes.len());

        let file_part = multipart::Part::bytes(audio_bytes)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);

        let api_url = format!(
            "{}/audio/transcriptions",
            self.endpoint.trim_end_matches('/')
        );

        let mut request = self.client.post(&api_url).multipart(form);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!(
                "Failed to send request to transcription API: {}", e
            )))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Transcription API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let transcription = response
            .json::<TranscriptionResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!(
                "Failed to parse transcription API response: {}", e
            )))?;

        Ok(TranscriptionOutput {
            text: transcription.text.trim().to_string(),
            // Servers that don't detect the language get a sensible default
            language: transcription.language.unwrap_or_else(|| "en".to_string()),
        })
    }
}
