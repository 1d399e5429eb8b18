use std::fmt;
use std::path::Path;

use log::info;

use crate::artifact_store::{
    Artifact, ArtifactKind, ArtifactStore, AudioArtifact, SynthesizedAudio, Transcript,
    Translation, VideoArtifact,
};
use crate::errors::{ProviderError, StageError};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::{SpeechSynthesisService, TranscriptionService, TranslationService};
use crate::transcoder::{AUDIO_CODEC, AUDIO_SAMPLE_RATE, TARGET_HEIGHT, Transcoder};

// @module: Pipeline stage execution

/// File name of the extracted audio track inside a run directory.
pub const OUTPUT_AUDIO_FILE: &str = "output_audio.wav";

/// File name of the synthesized speech inside a run directory.
pub const OUTPUT_SYNTH_FILE: &str = "output_synth.mp3";

/// Prefix for the rescaled video replacement.
pub const RESIZED_PREFIX: &str = "resized_";

/// Download file names offered to the user.
pub const DOWNLOAD_AUDIO_NAME: &str = "output_audio.mp3";
pub const DOWNLOAD_VIDEO_NAME: &str = "output_video.mp4";

/// The discrete pipeline operations a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Resize,
    Extract,
    Translate,
    Synthesize,
    Package,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resize => "resize",
            Stage::Extract => "extract",
            Stage::Translate => "translate",
            Stage::Synthesize => "synthesize",
            Stage::Package => "package",
        };
        write!(f, "{}", name)
    }
}

/// Success report for a completed stage, forwarded to the presentation layer.
#[derive(Debug, Clone)]
pub struct StageReport {
    /// The stage that completed
    pub stage: Stage,
    /// Short human-readable artifact summary
    pub summary: String,
}

/// Which files a download package contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Synthesized audio only
    Audio,
    /// Synthesized audio plus the current video
    AudioAndVideo,
}

/// One downloadable payload.
#[derive(Debug, Clone)]
pub struct DownloadFile {
    /// Name to offer the file under
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// Short content digest, for artifact identity
    pub digest: String,
}

/// Byte payloads assembled by the package stage.
#[derive(Debug, Clone, Default)]
pub struct DownloadBundle {
    pub files: Vec<DownloadFile>,
}

fn precondition(stage: Stage, missing: ArtifactKind) -> StageError {
    StageError::PreconditionNotMet { stage, missing }
}

fn fresh_video(store: &ArtifactStore, stage: Stage) -> Result<VideoArtifact, StageError> {
    if !store.is_fresh(ArtifactKind::Video) {
        return Err(precondition(stage, ArtifactKind::Video));
    }
    let Some(video) = store.video() else {
        return Err(precondition(stage, ArtifactKind::Video));
    };
    // A file that vanished from disk counts as not present
    if !FileManager::file_exists(&video.path) {
        return Err(precondition(stage, ArtifactKind::Video));
    }
    Ok(video.clone())
}

fn fresh_transcript(store: &ArtifactStore, stage: Stage) -> Result<Transcript, StageError> {
    if !store.is_fresh(ArtifactKind::Transcript) {
        return Err(precondition(stage, ArtifactKind::Transcript));
    }
    store
        .transcript()
        .cloned()
        .ok_or_else(|| precondition(stage, ArtifactKind::Transcript))
}

fn fresh_translation(store: &ArtifactStore, stage: Stage) -> Result<Translation, StageError> {
    if !store.is_fresh(ArtifactKind::Translation) {
        return Err(precondition(stage, ArtifactKind::Translation));
    }
    store
        .translation()
        .cloned()
        .ok_or_else(|| precondition(stage, ArtifactKind::Translation))
}

fn fresh_synthesized(store: &ArtifactStore, stage: Stage) -> Result<SynthesizedAudio, StageError> {
    if !store.is_fresh(ArtifactKind::SynthesizedAudio) {
        return Err(precondition(stage, ArtifactKind::SynthesizedAudio));
    }
    let Some(synthesized) = store.synthesized() else {
        return Err(precondition(stage, ArtifactKind::SynthesizedAudio));
    };
    if !FileManager::file_exists(&synthesized.path) {
        return Err(precondition(stage, ArtifactKind::SynthesizedAudio));
    }
    Ok(synthesized.clone())
}

/// Rescales the current video to 720p and replaces the video artifact.
pub struct ResizeRunner<'a> {
    pub transcoder: &'a dyn Transcoder,
    pub run_dir: &'a Path,
}

impl ResizeRunner<'_> {
    pub async fn run(&self, store: &mut ArtifactStore) -> Result<StageReport, StageError> {
        let video = fresh_video(store, Stage::Resize)?;

        let stem = video
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string());
        let extension = video
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "mp4".to_string());
        let output = self
            .run_dir
            .join(format!("{}{}.{}", RESIZED_PREFIX, stem, extension));

        info!("Rescaling {:?} to {}p", video.path, TARGET_HEIGHT);
        self.transcoder
            .resize(&video.path, &output)
            .await
            .map_err(|e| StageError::TranscodeFailed(e.to_string()))?;

        // The output file is the success signal, whatever the transcoder said
        if !FileManager::file_exists(&output) {
            return Err(StageError::TranscodeFailed(format!(
                "no output file was produced at {:?}",
                output
            )));
        }

        let summary = format!("rescaled to {}p: {}", TARGET_HEIGHT, output.display());
        store.put(Artifact::Video(VideoArtifact {
            path: output,
            resized: true,
        }));

        Ok(StageReport {
            stage: Stage::Resize,
            summary,
        })
    }
}

/// Extracts the audio track and transcribes it.
///
/// One user action covers both steps; the store is only updated once both the
/// transcoder and the transcription service have succeeded.
pub struct ExtractRunner<'a> {
    pub transcoder: &'a dyn Transcoder,
    pub transcriber: &'a dyn TranscriptionService,
    pub run_dir: &'a Path,
}

impl ExtractRunner<'_> {
    pub async fn run(&self, store: &mut ArtifactStore) -> Result<StageReport, StageError> {
        let video = fresh_video(store, Stage::Extract)?;
        let audio_path = self.run_dir.join(OUTPUT_AUDIO_FILE);

        info!("Extracting audio track from {:?}", video.path);
        self.transcoder
            .extract_audio(&video.path, &audio_path)
            .await
            .map_err(|e| StageError::ExtractionFailed(e.to_string()))?;

        if !FileManager::file_exists(&audio_path) {
            return Err(StageError::ExtractionFailed(format!(
                "no output file was produced at {:?}",
                audio_path
            )));
        }

        let transcription = self
            .transcriber
            .transcribe(&audio_path)
            .await
            .map_err(StageError::TranscriptionFailed)?;

        let language_name = language_utils::get_language_name(&transcription.language)
            .unwrap_or_else(|_| transcription.language.clone());
        let summary = format!(
            "transcribed {} characters of {} speech",
            transcription.text.chars().count(),
            language_name
        );

        store.put(Artifact::Audio(AudioArtifact {
            path: audio_path,
            sample_rate: AUDIO_SAMPLE_RATE,
            codec: AUDIO_CODEC.to_string(),
        }));
        store.put(Artifact::Transcript(Transcript {
            text: transcription.text,
            detected_language: transcription.language,
        }));

        Ok(StageReport {
            stage: Stage::Extract,
            summary,
        })
    }
}

/// Translates the transcript into the selected target language.
pub struct TranslateRunner<'a> {
    pub translator: &'a dyn TranslationService,
}

impl TranslateRunner<'_> {
    pub async fn run(
        &self,
        store: &mut ArtifactStore,
        target_language: &str,
    ) -> Result<StageReport, StageError> {
        let transcript = fresh_transcript(store, Stage::Translate)?;

        let translated = self
            .translator
            .translate(&transcript.text, target_language)
            .await
            .map_err(StageError::TranslationFailed)?;

        let summary = format!(
            "translated to {} ({} characters, {})",
            target_language,
            translated.chars().count(),
            FileManager::short_digest(translated.as_bytes())
        );

        // Replaces any previous translation wholesale; a changed target never
        // leaves two translations behind
        store.put(Artifact::Translation(Translation {
            text: translated,
            target_language: target_language.to_string(),
        }));

        Ok(StageReport {
            stage: Stage::Translate,
            summary,
        })
    }
}

/// Synthesizes speech audio from the translation.
pub struct SynthesizeRunner<'a> {
    pub synthesizer: &'a dyn SpeechSynthesisService,
    pub run_dir: &'a Path,
}

impl SynthesizeRunner<'_> {
    pub async fn run(&self, store: &mut ArtifactStore) -> Result<StageReport, StageError> {
        let translation = fresh_translation(store, Stage::Synthesize)?;
        let output = self.run_dir.join(OUTPUT_SYNTH_FILE);

        self.synthesizer
            .synthesize(&translation.text, &translation.target_language, &output)
            .await
            .map_err(StageError::SynthesisFailed)?;

        // Mirror the transcoder contract: the output file is the success signal
        if !FileManager::file_exists(&output) {
            return Err(StageError::SynthesisFailed(ProviderError::RequestFailed(
                format!("no audio file was produced at {:?}", output),
            )));
        }

        let summary = format!(
            "synthesized {} speech: {}",
            translation.target_language,
            output.display()
        );
        store.put(Artifact::Synthesized(SynthesizedAudio {
            path: output,
            language: translation.target_language,
        }));

        Ok(StageReport {
            stage: Stage::Synthesize,
            summary,
        })
    }
}

/// Assembles byte payloads for download. Performs no transformation and no
/// store mutation, only read-and-hand-off.
pub struct PackageRunner;

impl PackageRunner {
    pub fn run(
        &self,
        store: &ArtifactStore,
        kind: PackageKind,
    ) -> Result<DownloadBundle, StageError> {
        let synthesized = fresh_synthesized(store, Stage::Package)?;

        let mut bundle = DownloadBundle::default();
        bundle.files.push(Self::read_payload(
            &synthesized.path,
            DOWNLOAD_AUDIO_NAME,
            ArtifactKind::SynthesizedAudio,
        )?);

        if kind == PackageKind::AudioAndVideo {
            let video = fresh_video(store, Stage::Package)?;
            bundle.files.push(Self::read_payload(
                &video.path,
                DOWNLOAD_VIDEO_NAME,
                ArtifactKind::Video,
            )?);
        }

        Ok(bundle)
    }

    fn read_payload(
        path: &Path,
        file_name: &str,
        kind: ArtifactKind,
    ) -> Result<DownloadFile, StageError> {
        // A file that vanished between the guard and the read is the same
        // situation as a missing artifact
        let bytes =
            std::fs::read(path).map_err(|_| precondition(Stage::Package, kind))?;

        Ok(DownloadFile {
            digest: FileManager::short_digest(&bytes),
            file_name: file_name.to_string(),
            bytes,
        })
    }
}
