use anyhow::{Result, Context};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Write raw bytes to a file, creating the parent directory when needed
    pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Check whether a path looks like a video file ffmpeg can read
    pub fn is_video_file<P: AsRef<Path>>(path: P) -> bool {
        // Common video file extensions supported by ffmpeg
        // This list is not exhaustive but covers the most common formats
        let video_extensions = [
            "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v",
            "mpg", "mpeg", "ogv", "ts", "mts", "m2ts",
        ];

        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| video_extensions.contains(&ext.as_str()))
    }

    /// Short SHA-256 digest of a byte payload, for artifact identity in reports
    pub fn short_digest(bytes: &[u8]) -> String {
        let digest = Sha256::digest(bytes);
        let hex = format!("{:x}", digest);
        hex[..12].to_string()
    }
}
