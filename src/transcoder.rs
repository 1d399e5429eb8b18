use std::fmt::Debug;
use std::path::Path;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, error};
use tokio::process::Command;

// @module: External media transcoding via the ffmpeg CLI

/// Target height for the optional rescale pass; width follows the aspect ratio.
pub const TARGET_HEIGHT: u32 = 720;

/// Fixed output format for extracted audio: 48 kHz lossless PCM.
pub const AUDIO_SAMPLE_RATE: u32 = 48_000;
pub const AUDIO_CODEC: &str = "pcm_s24le";

/// Interface to the external media transcoder.
///
/// Success is signaled by the output file existing afterwards; callers treat
/// any error (or a missing output) as a stage failure and retry at will.
#[async_trait]
pub trait Transcoder: Send + Sync + Debug {
    /// Rescale a video to 720p height, preserving aspect ratio
    async fn resize(&self, input: &Path, output: &Path) -> Result<()>;

    /// Demux and convert the audio track to 48 kHz PCM WAV
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Transcoder backed by the `ffmpeg` command-line tool.
#[derive(Debug, Default, Clone)]
pub struct FfmpegTranscoder;

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self
    }

    /// Run ffmpeg with the given arguments and verify the expected output file.
    ///
    /// Adds a timeout to prevent hanging on problematic files.
    async fn run_ffmpeg(&self, args: &[&str], expected_output: &Path) -> Result<()> {
        debug!("ffmpeg {}", args.join(" "));

        let ffmpeg_future = Command::new("ffmpeg").args(args).output();

        let timeout_duration = std::time::Duration::from_secs(120); // 2 minute timeout for ffmpeg
        let result = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| anyhow!("Failed to execute ffmpeg command: {}", e))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(anyhow!("ffmpeg command timed out after 2 minutes"));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("ffmpeg failed: {}", filtered);
            return Err(anyhow!("ffmpeg failed: {}", filtered));
        }

        // ffmpeg can exit zero without writing anything (e.g. no matching
        // stream); the output file is the real success signal
        if !expected_output.exists() {
            return Err(anyhow!(
                "ffmpeg produced no output file: {:?}",
                expected_output
            ));
        }

        let file_size = std::fs::metadata(expected_output)?.len();
        if file_size == 0 {
            return Err(anyhow!("ffmpeg output file is empty: {:?}", expected_output));
        }

        Ok(())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn resize(&self, input: &Path, output: &Path) -> Result<()> {
        let scale = format!("scale=-1:{}", TARGET_HEIGHT);
        self.run_ffmpeg(
            &[
                "-y", // Overwrite existing file
                "-i", input.to_str().unwrap_or_default(),
                "-vf", &scale,
                output.to_str().unwrap_or_default(),
            ],
            output,
        )
        .await
    }

    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<()> {
        let sample_rate = AUDIO_SAMPLE_RATE.to_string();
        self.run_ffmpeg(
            &[
                "-y",
                "-i", input.to_str().unwrap_or_default(),
                "-acodec", AUDIO_CODEC,
                "-ar", &sample_rate,
                "-map", "a", // Audio track only
                output.to_str().unwrap_or_default(),
            ],
            output,
        )
        .await
    }
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Chapter",
        "    Chapter",
        "  Stream #",
        "      Metadata:",
        "        title",
        "        BPS",
        "        DURATION",
        "        NUMBER_OF",
        "        _STATISTICS",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
