// src/api/client.rs

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use url::Url;

use super::{QuestionSource, RosterSource, SubmissionIntake};
use crate::{
    error::EditorError,
    models::{
        question::QuestionResponse,
        roster::RosterResponse,
        submission::{CODE_FILE_FIELD, SubmissionRequest, SubmitResponse},
    },
};

/// HTTP client for the CodeLab platform API.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PlatformClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| format!("base URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl QuestionSource for PlatformClient {
    async fn fetch_question(&self, question_id: &str) -> Result<QuestionResponse, EditorError> {
        let url = self
            .endpoint(&["getQuestion", question_id])
            .map_err(EditorError::Fetch)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| EditorError::Fetch(e.to_string()))?;

        response
            .json::<QuestionResponse>()
            .await
            .map_err(|e| EditorError::Fetch(e.to_string()))
    }
}

#[async_trait]
impl SubmissionIntake for PlatformClient {
    async fn submit_code(&self, request: SubmissionRequest) -> Result<SubmitResponse, EditorError> {
        let url = self
            .endpoint(&["submitCode", &request.question_id])
            .map_err(EditorError::Submit)?;

        let part = Part::bytes(request.content)
            .file_name(request.file_name)
            .mime_str("text/plain")
            .map_err(|e| EditorError::Submit(e.to_string()))?;
        let form = Form::new().part(CODE_FILE_FIELD, part);

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| EditorError::Submit(e.to_string()))?;

        response
            .json::<SubmitResponse>()
            .await
            .map_err(|e| EditorError::Submit(e.to_string()))
    }
}

#[async_trait]
impl RosterSource for PlatformClient {
    async fn fetch_roster(
        &self,
        assignment_id: &str,
        bearer_token: &str,
    ) -> Result<RosterResponse, EditorError> {
        let url = self
            .endpoint(&["verified", "author", "viewStudentSubmission", assignment_id])
            .map_err(EditorError::Fetch)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(bearer_token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| EditorError::Fetch(e.to_string()))?;

        response
            .json::<RosterResponse>()
            .await
            .map_err(|e| EditorError::Fetch(e.to_string()))
    }
}
