use std::collections::HashMap;

use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;

/// Language utilities for target-language selection and display
///
/// The dubbing targets are a fixed table of supported languages; selection
/// accepts either the human-readable name or the code, case-insensitively.
/// Detected source languages reported by the transcriber are not limited to
/// this table.
/// Supported target languages as (name, code) pairs.
pub const SUPPORTED_LANGUAGES: [(&str, &str); 15] = [
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Polish", "pl"),
    ("Turkish", "tr"),
    ("Russian", "ru"),
    ("Dutch", "nl"),
    ("Czech", "cs"),
    ("Malayalam", "ml"),
    ("Hindi", "hi"),
    ("Arabic", "ar"),
    ("Chinese Simplified", "zh-cn"),
];

static CODE_BY_NAME: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
});

static NAME_BY_CODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SUPPORTED_LANGUAGES.iter().map(|(name, code)| (*code, *name)).collect());

/// Look up the code for a human-readable language name
pub fn code_for_name(name: &str) -> Option<&'static str> {
    CODE_BY_NAME.get(&name.trim().to_lowercase()).copied()
}

/// Look up the human-readable name for a supported target code
pub fn name_for_code(code: &str) -> Option<&'static str> {
    NAME_BY_CODE.get(code.trim().to_lowercase().as_str()).copied()
}

/// Whether a code is one of the supported dubbing targets
pub fn is_supported_target(code: &str) -> bool {
    name_for_code(code).is_some()
}

/// Resolve a user selection (language name or code) to a target code
pub fn resolve_target(selector: &str) -> Result<&'static str> {
    if let Some(name) = name_for_code(selector) {
        // Round-trip through the table so the returned code is canonical
        return code_for_name(name)
            .ok_or_else(|| anyhow!("Inconsistent language table for: {}", selector));
    }

    code_for_name(selector)
        .ok_or_else(|| anyhow!("Unsupported target language: {}", selector))
}

/// Get a display name for any language code
///
/// Falls back to ISO 639 lookup for detected codes outside the target table,
/// so transcriber output like "ja" still renders as "Japanese".
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if let Some(name) = name_for_code(&normalized) {
        return Ok(name.to_string());
    }

    let lang = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };

    lang.map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}
