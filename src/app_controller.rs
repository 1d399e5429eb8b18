use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::StageError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::pipeline_controller::PipelineController;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::speech_api::SpeechApi;
use crate::providers::whisper_api::WhisperApi;
use crate::stage_runner::{PackageKind, StageReport};
use crate::transcoder::FfmpegTranscoder;

// @module: Application controller for the dubbing workflow

/// Main application controller driving the pipeline end to end
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Build a pipeline over the configured external services
    fn build_pipeline(&self) -> PipelineController {
        let services = &self.config.services;

        PipelineController::new(
            Box::new(FfmpegTranscoder::new()),
            Box::new(WhisperApi::new(
                services.transcription.endpoint.clone(),
                services.transcription.api_key.clone(),
                services.transcription.model.clone(),
                services.transcription.timeout_secs,
            )),
            Box::new(LibreTranslate::new(
                services.translation.endpoint.clone(),
                services.translation.api_key.clone(),
                services.translation.timeout_secs,
            )),
            Box::new(SpeechApi::new(
                services.synthesis.endpoint.clone(),
                services.synthesis.api_key.clone(),
                services.synthesis.model.clone(),
                services.synthesis.voice.clone(),
                services.synthesis.timeout_secs,
            )),
            self.config.work_dir.clone(),
        )
    }

    /// Run the full dubbing workflow: load, optional rescale, extract and
    /// transcribe, translate, synthesize, then write the downloads.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        audio_only: bool,
    ) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        if !FileManager::is_video_file(&input_file) {
            warn!("Input does not have a known video extension, passing it to ffmpeg anyway");
        }

        FileManager::ensure_dir(&output_dir)?;

        let target_code = language_utils::resolve_target(&self.config.target_language)?;
        let target_name = language_utils::get_language_name(target_code)
            .unwrap_or_else(|_| target_code.to_string());
        info!("Dubbing {:?} into {}", input_file, target_name);

        let mut pipeline = self.build_pipeline();
        pipeline.load_video(&input_file)?;

        if self.config.resize_to_720p {
            Self::report("Rescaling video to 720p", pipeline.resize()).await?;
        }

        Self::report("Extracting and transcribing audio", pipeline.extract()).await?;
        if let Some(transcript) = pipeline.store().transcript() {
            info!("Transcript: {}", transcript.text);
        }

        Self::report("Translating transcript", pipeline.translate(target_code)).await?;
        if let Some(translation) = pipeline.store().translation() {
            info!("Translated text: {}", translation.text);
        }

        Self::report("Synthesizing speech", pipeline.synthesize()).await?;

        let kind = if audio_only {
            PackageKind::Audio
        } else {
            PackageKind::AudioAndVideo
        };
        let bundle = pipeline.package(kind).map_err(|e| {
            error!("Stage package failed ({}): {}", e.kind(), e);
            anyhow::Error::from(e)
        })?;

        for file in &bundle.files {
            let path = output_dir.join(&file.file_name);
            FileManager::write_bytes(&path, &file.bytes)
                .with_context(|| format!("Failed to write download: {:?}", path))?;
            info!("Wrote {} ({} bytes, {})", path.display(), file.bytes.len(), file.digest);
        }

        info!(
            "Dubbing completed in {} (status: {})",
            Self::format_duration(start_time.elapsed()),
            pipeline.status()
        );

        Ok(())
    }

    /// Run one stage behind a spinner and forward its outcome to the logs
    async fn report<F>(message: &str, stage_run: F) -> Result<StageReport>
    where
        F: std::future::Future<Output = Result<StageReport, StageError>>,
    {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        match stage_run.await {
            Ok(report) => {
                spinner.finish_and_clear();
                info!("Stage {} succeeded: {}", report.stage, report.summary);
                Ok(report)
            }
            Err(e) => {
                spinner.finish_and_clear();
                error!("Stage failed ({}): {}", e.kind(), e);
                Err(e.into())
            }
        }
    }

    /// Format a duration as human-readable text
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {:02}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{:01}s", total_secs, duration.subsec_millis() / 100)
        }
    }
}
