/*!
 * # Revoice - Video Dubbing Pipeline
 *
 * A Rust library for re-voicing videos: extract the audio track, transcribe
 * the speech, translate it to a target language, synthesize new speech audio,
 * and package the results for download.
 *
 * ## Features
 *
 * - Audio extraction and optional 720p rescaling via the ffmpeg CLI
 * - Transcription through an OpenAI-compatible whisper endpoint
 * - Translation through a LibreTranslate-compatible endpoint
 * - Speech synthesis through an OpenAI-compatible TTS endpoint
 * - Explicit artifact freshness tracking with guarded stage transitions
 * - Fixed table of fifteen supported target languages
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `artifact_store`: Per-run artifact and freshness bookkeeping
 * - `stage_runner`: One runner per pipeline stage with precondition guards
 * - `pipeline_controller`: The user-driven stage state machine
 * - `transcoder`: ffmpeg-backed resize and audio extraction
 * - `providers`: Clients for the external speech and translation services:
 *   - `providers::whisper_api`: Transcription API client
 *   - `providers::libretranslate`: Translation API client
 *   - `providers::speech_api`: Speech synthesis API client
 * - `app_controller`: Main application controller
 * - `language_utils`: Target-language table and display names
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod artifact_store;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline_controller;
pub mod providers;
pub mod stage_runner;
pub mod transcoder;

// Re-export main types for easier usage
pub use app_config::Config;
pub use artifact_store::{Artifact, ArtifactKind, ArtifactStore};
pub use errors::{AppError, ProviderError, StageError};
pub use pipeline_controller::{PipelineController, PipelineStatus};
pub use stage_runner::{DownloadBundle, PackageKind, Stage, StageReport};
pub use transcoder::{FfmpegTranscoder, Transcoder};
