/*!
 * Client implementations for the external speech and translation services.
 *
 * This module contains the collaborator interfaces consumed by the pipeline
 * core and one HTTP client per service:
 * - whisper_api: OpenAI-compatible audio transcription endpoint
 * - libretranslate: LibreTranslate-compatible text translation endpoint
 * - speech_api: OpenAI-compatible speech synthesis endpoint
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;

/// Result of transcribing an audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOutput {
    /// The transcribed text
    pub text: String,
    /// Detected source language code
    pub language: String,
}

/// Speech-to-text collaborator
///
/// Implementations turn an audio file on disk into text plus the detected
/// source language. They do not touch pipeline state.
#[async_trait]
pub trait TranscriptionService: Send + Sync + Debug {
    /// Transcribe the audio file at the given path
    async fn transcribe(&self, audio_path: &Path) -> Result<TranscriptionOutput, ProviderError>;
}

/// Text translation collaborator
#[async_trait]
pub trait TranslationService: Send + Sync + Debug {
    /// Translate text into the target language
    ///
    /// # Arguments
    /// * `text` - The source text
    /// * `target_language` - Target language code from the supported table
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;
}

/// Speech synthesis collaborator
///
/// Implementations write the synthesized audio to `output_path`; the file
/// existing afterwards is the success signal the pipeline relies on.
#[async_trait]
pub trait SpeechSynthesisService: Send + Sync + Debug {
    /// Synthesize speech for the text in the given language
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> Result<(), ProviderError>;
}

pub mod whisper_api;
pub mod libretranslate;
pub mod speech_api;
