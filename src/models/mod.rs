// src/models/mod.rs

use std::sync::LazyLock;

use regex::Regex;

pub mod activity;
pub mod draft;
pub mod question;
pub mod roster;
pub mod submission;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("identifier pattern is valid")
});

/// Question ids and course/assignment refs end up in URL paths and in the
/// uploaded file name, so they are limited to a path-safe charset.
pub fn validate_identifier(value: &str) -> Result<(), validator::ValidationError> {
    if !IDENTIFIER_RE.is_match(value) {
        return Err(validator::ValidationError::new("invalid_identifier"));
    }
    Ok(())
}
