/*!
 * Common test utilities for the revoice test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use revoice::pipeline_controller::PipelineController;


use mock_collaborators::{MockSynthesizer, MockTranscoder, MockTranscriber, MockTranslator};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a placeholder video file for testing
pub fn create_test_video(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, b"not actually mpeg-4 but close enough")
}

/// Builds a pipeline over all-working mock collaborators
pub fn working_pipeline(work_dir: &Path) -> PipelineController {
    PipelineController::new(
        Box::new(MockTranscoder::working()),
        Box::new(MockTranscriber::working()),
        Box::new(MockTranslator::working()),
        Box::new(MockSynthesizer::working()),
        work_dir,
    )
}

/// Whether any file with the given name exists anywhere under a directory
pub fn file_exists_under(dir: &Path, filename: &str) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if file_exists_under(&path, filename) {
                return true;
            }
        } else if path.file_name().is_some_and(|n| n == filename) {
            return true;
        }
    }
    false
}
