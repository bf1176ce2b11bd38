// src/editor/session.rs

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::keystroke::observe_keystroke;
use crate::{
    error::EditorError,
    models::{
        activity::{ActivityFlag, KeyEvent, KeystrokeVerdict},
        question::{PROMPT_LOADING, assignment_listing_path},
        submission::{SubmissionRequest, SubmitOutcome},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Loading,
    Editing,
    Submitting,
    /// Terminal. The browser has been told to navigate away.
    Submitted,
}

/// One in-progress submission for one question.
///
/// Holds the synchronous transitions only; network and storage calls are
/// driven by [`super::EditorService`] around them.
#[derive(Debug, Clone)]
pub struct EditorSession {
    id: Uuid,
    question_id: String,
    course_ref: String,
    assignment_ref: String,
    state: SessionState,
    prompt_text: String,
    source_text: String,
    activity: ActivityFlag,
    draft_expires_at: Option<i64>,
    last_active: i64,
    /// Held shared by an edit across its draft write and exclusively by a
    /// submit while it records the upload result.
    write_gate: Arc<RwLock<()>>,
}

/// Serializable view of a session handed to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub question_id: String,
    pub course_ref: String,
    pub assignment_ref: String,
    pub state: SessionState,
    pub prompt_text: String,
    pub source_text: String,
    pub activity: ActivityFlag,
    pub draft_expires_at: Option<i64>,
}

impl EditorSession {
    pub fn new(
        id: Uuid,
        question_id: &str,
        course_ref: &str,
        assignment_ref: &str,
        now: i64,
    ) -> Self {
        Self {
            id,
            question_id: question_id.to_string(),
            course_ref: course_ref.to_string(),
            assignment_ref: assignment_ref.to_string(),
            state: SessionState::Loading,
            prompt_text: PROMPT_LOADING.to_string(),
            source_text: String::new(),
            activity: ActivityFlag::None,
            draft_expires_at: None,
            last_active: now,
            write_gate: Arc::new(RwLock::new(())),
        }
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn activity(&self) -> ActivityFlag {
        self.activity
    }

    pub fn touch(&mut self, now: i64) {
        self.last_active = self.last_active.max(now);
    }

    /// No request has touched the session for longer than `idle_ms`.
    /// An upload in flight keeps it alive.
    pub fn is_idle(&self, now: i64, idle_ms: i64) -> bool {
        self.state != SessionState::Submitting && now - self.last_active > idle_ms
    }

    pub fn write_gate(&self) -> Arc<RwLock<()>> {
        self.write_gate.clone()
    }

    /// Question fetch resolved, successfully or not.
    pub fn finish_loading(&mut self, prompt_text: String, restored_source: String) {
        if self.state != SessionState::Loading {
            return;
        }
        self.prompt_text = prompt_text;
        self.source_text = restored_source;
        self.state = SessionState::Editing;
    }

    pub fn apply_edit(
        &mut self,
        source_text: String,
        draft_expires_at: Option<i64>,
    ) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.source_text = source_text;
        if draft_expires_at.is_some() {
            self.draft_expires_at = draft_expires_at;
        }
        Ok(())
    }

    pub fn apply_keystroke(&mut self, event: &KeyEvent) -> Result<KeystrokeVerdict, EditorError> {
        self.ensure_open()?;
        let verdict = observe_keystroke(self.activity, event);
        self.activity = verdict.activity;
        Ok(verdict)
    }

    pub fn dismiss_activity(&mut self) {
        self.activity = ActivityFlag::None;
    }

    /// Moves to `Submitting` and packages the current text for upload.
    pub fn begin_submit(&mut self) -> Result<SubmissionRequest, EditorError> {
        match self.state {
            SessionState::Submitting => Err(EditorError::SubmitInFlight),
            SessionState::Submitted => Err(EditorError::AlreadySubmitted),
            SessionState::Loading | SessionState::Editing => {
                self.state = SessionState::Submitting;
                Ok(SubmissionRequest::new(&self.question_id, &self.source_text))
            }
        }
    }

    /// Records the upload result. Text and draft are untouched on failure.
    pub fn finish_submit(&mut self, outcome: &SubmitOutcome) {
        self.state = if outcome.success {
            SessionState::Submitted
        } else {
            SessionState::Editing
        };
    }

    pub fn listing_path(&self) -> String {
        assignment_listing_path(&self.course_ref, &self.assignment_ref)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            question_id: self.question_id.clone(),
            course_ref: self.course_ref.clone(),
            assignment_ref: self.assignment_ref.clone(),
            state: self.state,
            prompt_text: self.prompt_text.clone(),
            source_text: self.source_text.clone(),
            activity: self.activity,
            draft_expires_at: self.draft_expires_at,
        }
    }

    fn ensure_open(&self) -> Result<(), EditorError> {
        if self.state == SessionState::Submitted {
            return Err(EditorError::AlreadySubmitted);
        }
        Ok(())
    }
}
