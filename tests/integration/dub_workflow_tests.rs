/*!
 * End-to-end dubbing workflow tests over mock collaborators
 */

use revoice::pipeline_controller::{PipelineController, PipelineStatus};
use revoice::stage_runner::{
    DOWNLOAD_AUDIO_NAME, DOWNLOAD_VIDEO_NAME, PackageKind, Stage,
};

use crate::common::mock_collaborators::{
    MockSynthesizer, MockTranscoder, MockTranscriber, MockTranslator,
};
use crate::common::{create_temp_dir, create_test_video, working_pipeline};

#[tokio::test]
async fn test_dubWorkflow_withSpanishTarget_shouldProduceAllArtifacts() {
    let temp_dir = create_temp_dir().unwrap();
    let video = create_test_video(temp_dir.path(), "clip.mp4").unwrap();

    let mut pipeline = PipelineController::new(
        Box::new(MockTranscoder::working()),
        Box::new(MockTranscriber::with_result("hello world", "en")),
        Box::new(MockTranslator::with_fixed_translation("hola mundo")),
        Box::new(MockSynthesizer::working()),
        temp_dir.path(),
    );

    pipeline.load_video(&video).unwrap();

    let report = pipeline.extract().await.unwrap();
    assert_eq!(report.stage, Stage::Extract);
    let transcript = pipeline.store().transcript().unwrap().clone();
    assert_eq!(transcript.text, "hello world");
    assert_eq!(transcript.detected_language, "en");
    let audio = pipeline.store().audio().unwrap().clone();
    assert_eq!(audio.sample_rate, 48_000);
    assert_eq!(audio.codec, "pcm_s24le");
    assert!(audio.path.exists());

    pipeline.translate("es").await.unwrap();
    let translation = pipeline.store().translation().unwrap();
    assert_eq!(translation.text, "hola mundo");
    assert_eq!(translation.target_language, "es");

    pipeline.synthesize().await.unwrap();
    let synthesized = pipeline.store().synthesized().unwrap();
    assert_eq!(synthesized.language, "es");
    assert!(synthesized.path.exists());
    assert_ne!(synthesized.path, audio.path);

    let bundle = pipeline.package(PackageKind::AudioAndVideo).unwrap();
    assert_eq!(bundle.files.len(), 2);
    assert_eq!(bundle.files[0].file_name, DOWNLOAD_AUDIO_NAME);
    assert_eq!(bundle.files[1].file_name, DOWNLOAD_VIDEO_NAME);
    assert!(bundle.files.iter().all(|f| !f.bytes.is_empty()));
    assert!(bundle.files.iter().all(|f| !f.digest.is_empty()));

    assert_eq!(pipeline.status(), PipelineStatus::Packaged);
}

#[tokio::test]
async fn test_dubWorkflow_withAudioOnlyPackage_shouldOmitVideo() {
    let temp_dir = create_temp_dir().unwrap();
    let video = create_test_video(temp_dir.path(), "clip.mp4").unwrap();
    let mut pipeline = working_pipeline(temp_dir.path());

    pipeline.load_video(&video).unwrap();
    pipeline.extract().await.unwrap();
    pipeline.translate("de").await.unwrap();
    pipeline.synthesize().await.unwrap();

    let bundle = pipeline.package(PackageKind::Audio).unwrap();
    assert_eq!(bundle.files.len(), 1);
    assert_eq!(bundle.files[0].file_name, DOWNLOAD_AUDIO_NAME);
}

#[tokio::test]
async fn test_dubWorkflow_withOptionalResize_shouldDubTheResizedVideo() {
    let temp_dir = create_temp_dir().unwrap();
    let video = create_test_video(temp_dir.path(), "clip.mp4").unwrap();
    let mut pipeline = working_pipeline(temp_dir.path());

    pipeline.load_video(&video).unwrap();
    pipeline.resize().await.unwrap();
    pipeline.extract().await.unwrap();
    pipeline.translate("pl").await.unwrap();
    pipeline.synthesize().await.unwrap();

    let bundle = pipeline.package(PackageKind::AudioAndVideo).unwrap();
    // The packaged video is the rescaled replacement, not the upload
    let video_payload = &bundle.files[1];
    assert_eq!(video_payload.bytes, b"720p video payload");
}

#[tokio::test]
async fn test_dubWorkflow_withSecondLanguagePass_shouldRedubCleanly() {
    let temp_dir = create_temp_dir().unwrap();
    let video = create_test_video(temp_dir.path(), "clip.mp4").unwrap();
    let mut pipeline = working_pipeline(temp_dir.path());

    pipeline.load_video(&video).unwrap();
    pipeline.extract().await.unwrap();

    for target in ["es", "fr", "zh-cn"] {
        pipeline.translate(target).await.unwrap();
        pipeline.synthesize().await.unwrap();
        let bundle = pipeline.package(PackageKind::Audio).unwrap();

        assert_eq!(pipeline.store().synthesized().unwrap().language, target);
        assert_eq!(bundle.files.len(), 1);
        assert_eq!(pipeline.status(), PipelineStatus::Packaged);
    }

    // The transcript survived all passes untouched
    assert_eq!(pipeline.store().transcript().unwrap().text, "hello world");
}

#[tokio::test]
async fn test_dubWorkflow_withOutOfOrderActions_shouldGuardEveryStep() {
    let temp_dir = create_temp_dir().unwrap();
    let video = create_test_video(temp_dir.path(), "clip.mp4").unwrap();
    let mut pipeline = working_pipeline(temp_dir.path());

    // Everything before a video is loaded is rejected
    assert!(pipeline.extract().await.is_err());
    assert!(pipeline.translate("es").await.is_err());
    assert!(pipeline.synthesize().await.is_err());
    assert!(pipeline.package(PackageKind::Audio).is_err());

    pipeline.load_video(&video).unwrap();

    // Skipping ahead is still rejected, one missing artifact at a time
    assert!(pipeline.synthesize().await.is_err());
    assert!(pipeline.package(PackageKind::Audio).is_err());

    // Performing the stages in order unlocks each next one
    pipeline.extract().await.unwrap();
    pipeline.translate("es").await.unwrap();
    pipeline.synthesize().await.unwrap();
    assert!(pipeline.package(PackageKind::Audio).is_ok());
}
