use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language for dubbing (name or code from the supported table)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Directory for intermediate run artifacts
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Whether to rescale the video to 720p before extraction
    #[serde(default)]
    pub resize_to_720p: bool,

    /// External service configuration
    #[serde(default)]
    pub services: ServicesConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for the external speech/translation services
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ServicesConfig {
    /// Transcription service settings
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Translation service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Speech synthesis service settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}

/// Transcription service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Model name (e.g., "whisper-1", "base")
    #[serde(default = "default_transcription_model")]
    pub model: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (OpenAI-compatible, for self-hosted whisper servers)
    #[serde(default = "default_transcription_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_media_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: default_transcription_model(),
            api_key: String::new(),
            endpoint: default_transcription_endpoint(),
            timeout_secs: default_media_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// API key for the service (optional for self-hosted instances)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (LibreTranslate-compatible)
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_translation_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Speech synthesis service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// Model name (e.g., "tts-1")
    #[serde(default = "default_synthesis_model")]
    pub model: String,

    /// Voice identifier
    #[serde(default = "default_synthesis_voice")]
    pub voice: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (OpenAI-compatible, for self-hosted TTS servers)
    #[serde(default = "default_synthesis_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_media_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            model: default_synthesis_model(),
            voice: default_synthesis_voice(),
            api_key: String::new(),
            endpoint: default_synthesis_endpoint(),
            timeout_secs: default_media_timeout_secs(),
        }
    }
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_work_dir() -> PathBuf {
    PathBuf::from("revoice-work")
}

fn default_timeout_secs() -> u64 {
    30
}

// Audio upload and synthesis move whole files; give them more room
fn default_media_timeout_secs() -> u64 {
    120
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_transcription_endpoint() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_translation_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_synthesis_model() -> String {
    "tts-1".to_string()
}

fn default_synthesis_voice() -> String {
    "alloy".to_string()
}

fn default_synthesis_endpoint() -> String {
    "http://localhost:8001/v1".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate the target language against the supported table
        let _target_code = crate::language_utils::resolve_target(&self.target_language)?;

        if self.work_dir.as_os_str().is_empty() {
            return Err(anyhow!("Work directory must not be empty"));
        }

        if self.services.transcription.endpoint.is_empty() {
            return Err(anyhow!("Transcription endpoint must not be empty"));
        }
        if self.services.translation.endpoint.is_empty() {
            return Err(anyhow!("Translation endpoint must not be empty"));
        }
        if self.services.synthesis.endpoint.is_empty() {
            return Err(anyhow!("Synthesis endpoint must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            work_dir: default_work_dir(),
            resize_to_720p: false,
            services: ServicesConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}
