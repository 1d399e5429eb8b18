use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{debug, info};
use uuid::Uuid;

use crate::artifact_store::{Artifact, ArtifactKind, ArtifactStore, VideoArtifact};
use crate::errors::StageError;
use crate::file_utils::FileManager;
use crate::providers::{SpeechSynthesisService, TranscriptionService, TranslationService};
use crate::stage_runner::{
    DownloadBundle, ExtractRunner, PackageKind, PackageRunner, ResizeRunner, StageReport,
    SynthesizeRunner, TranslateRunner,
};
use crate::transcoder::Transcoder;

// @module: Pipeline state machine

/// Externally observable progress of the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    /// No video loaded yet
    Empty,
    /// A video is loaded (possibly rescaled)
    VideoReady,
    /// Audio extracted and transcribed
    AudioAndTranscriptReady,
    /// Transcript translated to the current target language
    Translated,
    /// Speech synthesized for the current translation
    Synthesized,
    /// Downloads assembled for the current synthesized audio
    Packaged,
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStatus::Empty => "empty",
            PipelineStatus::VideoReady => "video ready",
            PipelineStatus::AudioAndTranscriptReady => "audio and transcript ready",
            PipelineStatus::Translated => "translated",
            PipelineStatus::Synthesized => "synthesized",
            PipelineStatus::Packaged => "packaged",
        };
        write!(f, "{}", name)
    }
}

/// State machine sequencing the dubbing stages for one run.
///
/// Stages are triggered individually by user actions, in any order; every
/// stage method checks its preconditions against the artifact store and
/// returns `PreconditionNotMet` without touching state when an upstream
/// artifact is missing or stale. Re-running a stage with unchanged inputs
/// reproduces the same artifact references, so retrying after a failure is
/// always safe.
pub struct PipelineController {
    store: ArtifactStore,
    transcoder: Box<dyn Transcoder>,
    transcriber: Box<dyn TranscriptionService>,
    translator: Box<dyn TranslationService>,
    synthesizer: Box<dyn SpeechSynthesisService>,
    work_dir: PathBuf,
    run_dir: Option<PathBuf>,
    packaged: bool,
}

impl PipelineController {
    /// Create a controller over the given collaborators.
    ///
    /// Intermediate artifacts are written to per-run directories under
    /// `work_dir`. Each session must own its controller; runs never share
    /// state.
    pub fn new(
        transcoder: Box<dyn Transcoder>,
        transcriber: Box<dyn TranscriptionService>,
        translator: Box<dyn TranslationService>,
        synthesizer: Box<dyn SpeechSynthesisService>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store: ArtifactStore::new(),
            transcoder,
            transcriber,
            translator,
            synthesizer,
            work_dir: work_dir.into(),
            run_dir: None,
            packaged: false,
        }
    }

    /// Start a new run from an uploaded video.
    ///
    /// Discards every artifact of the previous run; the old run directory is
    /// left on disk for the surrounding application to clean up.
    pub fn load_video(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(anyhow!("Video file does not exist: {:?}", path));
        }

        let run_dir = self
            .work_dir
            .join(format!("run-{}", Uuid::new_v4().simple()));
        FileManager::ensure_dir(&run_dir)?;
        debug!("New pipeline run in {:?}", run_dir);

        self.store.clear();
        self.packaged = false;
        self.run_dir = Some(run_dir);
        self.store.put(Artifact::Video(VideoArtifact {
            path: path.to_path_buf(),
            resized: false,
        }));

        info!("Video loaded: {:?}", path);
        Ok(())
    }

    /// Rescale the current video to 720p, replacing the video artifact.
    pub async fn resize(&mut self) -> Result<StageReport, StageError> {
        let run_dir = self.run_dir.as_deref().unwrap_or(&self.work_dir);
        let runner = ResizeRunner {
            transcoder: self.transcoder.as_ref(),
            run_dir,
        };
        let report = runner.run(&mut self.store).await?;
        self.packaged = false;
        Ok(report)
    }

    /// Extract the audio track and transcribe it.
    pub async fn extract(&mut self) -> Result<StageReport, StageError> {
        let run_dir = self.run_dir.as_deref().unwrap_or(&self.work_dir);
        let runner = ExtractRunner {
            transcoder: self.transcoder.as_ref(),
            transcriber: self.transcriber.as_ref(),
            run_dir,
        };
        let report = runner.run(&mut self.store).await?;
        self.packaged = false;
        Ok(report)
    }

    /// Translate the transcript into the target language.
    ///
    /// A different target overwrites the previous translation and re-arms the
    /// synthesize and package stages.
    pub async fn translate(&mut self, target_language: &str) -> Result<StageReport, StageError> {
        let runner = TranslateRunner {
            translator: self.translator.as_ref(),
        };
        let report = runner.run(&mut self.store, target_language).await?;
        self.packaged = false;
        Ok(report)
    }

    /// Synthesize speech audio for the current translation.
    pub async fn synthesize(&mut self) -> Result<StageReport, StageError> {
        let run_dir = self.run_dir.as_deref().unwrap_or(&self.work_dir);
        let runner = SynthesizeRunner {
            synthesizer: self.synthesizer.as_ref(),
            run_dir,
        };
        let report = runner.run(&mut self.store).await?;
        self.packaged = false;
        Ok(report)
    }

    /// Assemble download payloads for the requested package kind.
    pub fn package(&mut self, kind: PackageKind) -> Result<DownloadBundle, StageError> {
        let bundle = PackageRunner.run(&self.store, kind)?;
        self.packaged = true;
        Ok(bundle)
    }

    /// Current progress, derived from artifact freshness.
    pub fn status(&self) -> PipelineStatus {
        if self.packaged && self.store.is_fresh(ArtifactKind::SynthesizedAudio) {
            return PipelineStatus::Packaged;
        }
        if self.store.is_fresh(ArtifactKind::SynthesizedAudio) {
            PipelineStatus::Synthesized
        } else if self.store.is_fresh(ArtifactKind::Translation) {
            PipelineStatus::Translated
        } else if self.store.is_fresh(ArtifactKind::Transcript) {
            PipelineStatus::AudioAndTranscriptReady
        } else if self.store.is_fresh(ArtifactKind::Video) {
            PipelineStatus::VideoReady
        } else {
            PipelineStatus::Empty
        }
    }

    /// Read access to the artifact store, for status displays and tests.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }
}
