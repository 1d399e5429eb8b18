/*!
 * Tests for application configuration
 */

use std::path::PathBuf;

use revoice::app_config::{Config, LogLevel};

#[test]
fn test_defaultConfig_shouldHaveSensibleValues() {
    let config = Config::default();

    assert_eq!(config.target_language, "es");
    assert_eq!(config.work_dir, PathBuf::from("revoice-work"));
    assert!(!config.resize_to_720p);
    assert_eq!(config.log_level, LogLevel::Info);

    assert_eq!(config.services.transcription.model, "whisper-1");
    assert!(!config.services.transcription.endpoint.is_empty());
    assert!(!config.services.translation.endpoint.is_empty());
    assert!(!config.services.synthesis.endpoint.is_empty());
    assert_eq!(config.services.synthesis.voice, "alloy");
}

#[test]
fn test_defaultConfig_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_serialization_withRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.target_language = "French".to_string();
    config.resize_to_720p = true;
    config.services.translation.api_key = "secret".to_string();
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.target_language, "French");
    assert!(parsed.resize_to_720p);
    assert_eq!(parsed.services.translation.api_key, "secret");
    assert_eq!(parsed.log_level, LogLevel::Debug);
}

#[test]
fn test_deserialization_withEmptyObject_shouldFillDefaults() {
    let parsed: Config = serde_json::from_str("{}").unwrap();

    assert_eq!(parsed.target_language, "es");
    assert_eq!(parsed.services.transcription.model, "whisper-1");
    assert_eq!(parsed.log_level, LogLevel::Info);
}

#[test]
fn test_deserialization_withPartialServices_shouldFillRemainingDefaults() {
    let json = r#"{
        "target_language": "de",
        "services": {
            "translation": { "endpoint": "https://translate.example.com" }
        }
    }"#;
    let parsed: Config = serde_json::from_str(json).unwrap();

    assert_eq!(parsed.target_language, "de");
    assert_eq!(parsed.services.translation.endpoint, "https://translate.example.com");
    // Untouched sections keep their defaults
    assert_eq!(parsed.services.synthesis.model, "tts-1");
    assert_eq!(parsed.services.transcription.timeout_secs, 120);
}

#[test]
fn test_validate_withUnsupportedTargetLanguage_shouldFail() {
    let mut config = Config::default();
    config.target_language = "Klingon".to_string();
    assert!(config.validate().is_err());

    // Valid ISO code that is not a dubbing target
    config.target_language = "ja".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withTargetLanguageName_shouldSucceed() {
    let mut config = Config::default();
    config.target_language = "Spanish".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withEmptyEndpoint_shouldFail() {
    let mut config = Config::default();
    config.services.synthesis.endpoint = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_logLevel_withSerde_shouldUseLowercaseNames() {
    assert_eq!(serde_json::to_string(&LogLevel::Debug).unwrap(), "\"debug\"");
    let parsed: LogLevel = serde_json::from_str("\"trace\"").unwrap();
    assert_eq!(parsed, LogLevel::Trace);
}
