// src/models/question.rs

use serde::{Deserialize, Serialize};

/// Prompt shown while the question fetch is outstanding.
pub const PROMPT_LOADING: &str = "Loading question...";
/// The platform answered `success` but carried no text.
pub const PROMPT_NOT_FOUND: &str = "Question not found.";
/// The platform answered with `success: false`.
pub const PROMPT_FAILED: &str = "Failed to load question.";
/// Transport error or non-2xx status.
pub const PROMPT_ERROR: &str = "Error fetching question text.";

/// Response body of the platform's question fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub success: bool,
    #[serde(default)]
    pub question_text: Option<String>,
}

/// The question as the editor sees it. Read-only, owned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub identifier: String,
    pub prompt_text: String,
}

/// Browser route of the assignment listing for `(course, assignment)`.
pub fn assignment_listing_path(course_ref: &str, assignment_ref: &str) -> String {
    format!("/enrolled/{}/{}", course_ref, assignment_ref)
}
