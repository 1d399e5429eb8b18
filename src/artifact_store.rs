use std::fmt;
use std::path::{Path, PathBuf};

// @module: Artifact bookkeeping for a single pipeline run

/// The five artifact slots of a pipeline run, in dependency order.
///
/// Each kind depends on every kind before it: replacing an artifact marks
/// everything after it stale until the corresponding stage is re-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Source or resized video file
    Video,
    /// Audio track extracted from the video
    Audio,
    /// Transcribed text with detected source language
    Transcript,
    /// Transcript translated to the target language
    Translation,
    /// Speech audio synthesized from the translation
    SynthesizedAudio,
}

impl ArtifactKind {
    /// All kinds, upstream first. `put` walks this to invalidate downstream slots.
    pub const DEPENDENCY_ORDER: [ArtifactKind; 5] = [
        ArtifactKind::Video,
        ArtifactKind::Audio,
        ArtifactKind::Transcript,
        ArtifactKind::Translation,
        ArtifactKind::SynthesizedAudio,
    ];

    fn index(self) -> usize {
        match self {
            ArtifactKind::Video => 0,
            ArtifactKind::Audio => 1,
            ArtifactKind::Transcript => 2,
            ArtifactKind::Translation => 3,
            ArtifactKind::SynthesizedAudio => 4,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Video => "video",
            ArtifactKind::Audio => "audio",
            ArtifactKind::Transcript => "transcript",
            ArtifactKind::Translation => "translation",
            ArtifactKind::SynthesizedAudio => "synthesized audio",
        };
        write!(f, "{}", name)
    }
}

// @struct: Video file reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoArtifact {
    // @field: Path of the video file
    pub path: PathBuf,

    // @field: Whether the file is the 720p-rescaled replacement
    pub resized: bool,
}

// @struct: Extracted audio track reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    // @field: Path of the audio file
    pub path: PathBuf,

    // @field: Sample rate in Hz
    pub sample_rate: u32,

    // @field: Audio codec name
    pub codec: String,
}

/// Transcribed speech with the language the transcriber detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub detected_language: String,
}

/// Transcript text translated to a target language.
///
/// A new target language overwrites the previous translation; there is never
/// more than one translation per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub target_language: String,
}

/// Synthesized speech audio in the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub path: PathBuf,
    pub language: String,
}

/// One artifact of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Video(VideoArtifact),
    Audio(AudioArtifact),
    Transcript(Transcript),
    Translation(Translation),
    Synthesized(SynthesizedAudio),
}

impl Artifact {
    /// The slot this artifact belongs to.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Video(_) => ArtifactKind::Video,
            Artifact::Audio(_) => ArtifactKind::Audio,
            Artifact::Transcript(_) => ArtifactKind::Transcript,
            Artifact::Translation(_) => ArtifactKind::Translation,
            Artifact::Synthesized(_) => ArtifactKind::SynthesizedAudio,
        }
    }

    /// The on-disk file this artifact references, if it references one.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Artifact::Video(v) => Some(&v.path),
            Artifact::Audio(a) => Some(&a.path),
            Artifact::Synthesized(s) => Some(&s.path),
            Artifact::Transcript(_) | Artifact::Translation(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    artifact: Artifact,
    fresh: bool,
}

/// In-memory record of which artifacts exist and which are still fresh.
///
/// Storing an artifact marks every downstream slot stale; a stale artifact
/// stays readable through `get` but fails `is_fresh`, so stage preconditions
/// reject it until its stage is re-run. The store never touches the
/// filesystem; paths it holds are owned by the surrounding application.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    slots: [Option<Slot>; 5],
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the artifact for its kind and invalidate all
    /// downstream artifacts transitively.
    pub fn put(&mut self, artifact: Artifact) {
        let kind = artifact.kind();
        for downstream in &ArtifactKind::DEPENDENCY_ORDER[kind.index() + 1..] {
            if let Some(slot) = &mut self.slots[downstream.index()] {
                slot.fresh = false;
            }
        }
        self.slots[kind.index()] = Some(Slot { artifact, fresh: true });
    }

    /// The current artifact for a kind, fresh or stale.
    pub fn get(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.slots[kind.index()].as_ref().map(|slot| &slot.artifact)
    }

    /// Whether the artifact exists and no upstream artifact has been replaced
    /// since it was produced.
    pub fn is_fresh(&self, kind: ArtifactKind) -> bool {
        self.slots[kind.index()]
            .as_ref()
            .is_some_and(|slot| slot.fresh)
    }

    /// Drop every artifact. Used when a new video starts a new run.
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn video(&self) -> Option<&VideoArtifact> {
        match self.get(ArtifactKind::Video) {
            Some(Artifact::Video(v)) => Some(v),
            _ => None,
        }
    }

    pub fn audio(&self) -> Option<&AudioArtifact> {
        match self.get(ArtifactKind::Audio) {
            Some(Artifact::Audio(a)) => Some(a),
            _ => None,
        }
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        match self.get(ArtifactKind::Transcript) {
            Some(Artifact::Transcript(t)) => Some(t),
            _ => None,
        }
    }

    pub fn translation(&self) -> Option<&Translation> {
        match self.get(ArtifactKind::Translation) {
            Some(Artifact::Translation(t)) => Some(t),
            _ => None,
        }
    }

    pub fn synthesized(&self) -> Option<&SynthesizedAudio> {
        match self.get(ArtifactKind::SynthesizedAudio) {
            Some(Artifact::Synthesized(s)) => Some(s),
            _ => None,
        }
    }
}
