// src/api/mod.rs

//! Ports onto the remote CodeLab platform API.
//!
//! The editor core only sees these traits; [`PlatformClient`] is the HTTP
//! implementation and tests substitute in-process fakes.

use async_trait::async_trait;

use crate::{
    error::EditorError,
    models::{
        question::QuestionResponse,
        roster::RosterResponse,
        submission::{SubmissionRequest, SubmitResponse},
    },
};

pub mod client;

pub use client::PlatformClient;

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetches a question. Transport errors and non-2xx statuses are
    /// `EditorError::Fetch`; an unsuccessful body is still `Ok`.
    async fn fetch_question(&self, question_id: &str) -> Result<QuestionResponse, EditorError>;
}

#[async_trait]
pub trait SubmissionIntake: Send + Sync {
    /// Uploads the code file. Transport errors and non-2xx statuses are
    /// `EditorError::Submit`; an unsuccessful body is still `Ok`.
    async fn submit_code(&self, request: SubmissionRequest) -> Result<SubmitResponse, EditorError>;
}

#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_roster(
        &self,
        assignment_id: &str,
        bearer_token: &str,
    ) -> Result<RosterResponse, EditorError>;
}
