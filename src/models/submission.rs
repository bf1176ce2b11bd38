// src/models/submission.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::validate_identifier;

pub const NOTICE_SUBMITTED: &str = "Code submitted successfully!";
pub const NOTICE_REJECTED: &str = "Failed to submit code.";
pub const NOTICE_ERROR: &str = "Error submitting code. Please try again.";

/// Multipart field name the platform expects the code file under.
pub const CODE_FILE_FIELD: &str = "codeFile";

/// The file upload sent to the submission intake. Lives for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub question_id: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

impl SubmissionRequest {
    pub fn new(question_id: &str, source_text: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            file_name: format!("{}.c", question_id),
            content: source_text.as_bytes().to_vec(),
        }
    }
}

/// Response body of the submission intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
}

/// What the browser should do after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub success: bool,
    pub notice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
}

impl SubmitOutcome {
    pub fn accepted(navigate_to: String) -> Self {
        Self {
            success: true,
            notice: NOTICE_SUBMITTED.to_string(),
            navigate_to: Some(navigate_to),
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            notice: NOTICE_REJECTED.to_string(),
            navigate_to: None,
        }
    }

    pub fn errored() -> Self {
        Self {
            success: false,
            notice: NOTICE_ERROR.to_string(),
            navigate_to: None,
        }
    }
}

/// DTO for opening an editor session.
#[derive(Debug, Deserialize, Validate)]
pub struct OpenSessionRequest {
    #[validate(custom(function = validate_identifier))]
    pub question_id: String,
    #[validate(custom(function = validate_identifier))]
    pub course_ref: String,
    #[validate(custom(function = validate_identifier))]
    pub assignment_ref: String,
}

/// DTO for a change event from the editor.
#[derive(Debug, Deserialize, Validate)]
pub struct EditRequest {
    #[validate(length(max = 262144, message = "Source text must not exceed 262144 characters."))]
    pub source_text: String,
}
