//! Script field constraints and validation.
//!
//! Validation happens here, before anything touches the store, and reports
//! field-level messages via [`CoreError::Validation`].

use crate::error::CoreError;

/// Minimum title length in characters.
pub const TITLE_MIN: usize = 3;
/// Maximum title length in characters.
pub const TITLE_MAX: usize = 100;
/// Minimum description length in characters.
pub const DESCRIPTION_MIN: usize = 10;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 500;

/// The closed set of accepted language tags, with `other` as the fallback.
pub const LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "csharp",
    "cpp",
    "php",
    "ruby",
    "go",
    "rust",
    "bash",
    "powershell",
    "other",
];

/// Suffix appended to a source title when forking.
const FORK_SUFFIX: &str = " (Forked)";

/// Title of a fork of `source_title`, capped at [`TITLE_MAX`] characters so
/// forks of maximum-length titles stay within the title constraint.
pub fn fork_title(source_title: &str) -> String {
    let max_source = TITLE_MAX - FORK_SUFFIX.chars().count();
    let source: String = source_title.chars().take(max_source).collect();
    format!("{}{FORK_SUFFIX}", source.trim_end())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if len < TITLE_MIN {
        return Err(CoreError::Validation(format!(
            "title must be at least {TITLE_MIN} characters long"
        )));
    }
    if len > TITLE_MAX {
        return Err(CoreError::Validation(format!(
            "title cannot exceed {TITLE_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.trim().chars().count();
    if len < DESCRIPTION_MIN {
        return Err(CoreError::Validation(format!(
            "description must be at least {DESCRIPTION_MIN} characters long"
        )));
    }
    if len > DESCRIPTION_MAX {
        return Err(CoreError::Validation(format!(
            "description cannot exceed {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_language(language: &str) -> Result<(), CoreError> {
    if !LANGUAGES.contains(&language) {
        return Err(CoreError::Validation(format!(
            "language must be one of: {}",
            LANGUAGES.join(", ")
        )));
    }
    Ok(())
}

/// Trim tag entries and drop any that end up empty. Order is preserved
/// (it matters for display, not for matching).
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
