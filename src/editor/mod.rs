// src/editor/mod.rs

//! Editor session manager.
//!
//! A session walks `loading -> editing -> submitting -> {submitted | editing}`.
//! Opening a session fetches the question and restores any live draft; every
//! edit rewrites the draft with a fresh five-minute expiry; submitting
//! uploads the code as `<question>.c` and, on success, tells the browser
//! where to navigate.

use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::{QuestionSource, SubmissionIntake},
    error::EditorError,
    models::{
        activity::{KeyEvent, KeystrokeVerdict},
        draft::DRAFT_TTL_MS,
        question::{PROMPT_ERROR, PROMPT_FAILED, PROMPT_NOT_FOUND, QuestionView},
        submission::SubmitOutcome,
    },
    store::DraftStore,
};

pub mod clock;
pub mod drafts;
pub mod keystroke;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use drafts::{restore_draft, save_draft};
pub use session::{EditorSession, SessionSnapshot, SessionState};

/// Fetches a question through the platform port.
///
/// `success: false` is `QuestionRejected`; a success without text still
/// yields a view carrying the "not found" prompt.
pub async fn load_question(
    source: &dyn QuestionSource,
    question_id: &str,
) -> Result<QuestionView, EditorError> {
    let response = source.fetch_question(question_id).await?;
    if !response.success {
        return Err(EditorError::QuestionRejected);
    }

    Ok(QuestionView {
        identifier: question_id.to_string(),
        prompt_text: response
            .question_text
            .unwrap_or_else(|| PROMPT_NOT_FOUND.to_string()),
    })
}

/// Prompt shown in place of the question when loading failed.
pub fn fallback_prompt(err: &EditorError) -> &'static str {
    match err {
        EditorError::QuestionRejected => PROMPT_FAILED,
        _ => PROMPT_ERROR,
    }
}

/// How long a session may go untouched before the next `open` drops it.
pub const SESSION_IDLE_MS: i64 = DRAFT_TTL_MS;

/// Result of one edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditAck {
    pub draft_saved: bool,
    pub draft_expires_at: Option<i64>,
}

/// Owns the live sessions and the ports they talk through.
pub struct EditorService {
    questions: Arc<dyn QuestionSource>,
    intake: Arc<dyn SubmissionIntake>,
    drafts: Arc<dyn DraftStore>,
    clock: Arc<dyn Clock>,
    sessions: Mutex<HashMap<Uuid, EditorSession>>,
}

impl EditorService {
    pub fn new(
        questions: Arc<dyn QuestionSource>,
        intake: Arc<dyn SubmissionIntake>,
        drafts: Arc<dyn DraftStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            questions,
            intake,
            drafts,
            clock,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Starts a session: loads the question, then restores the draft.
    ///
    /// A failed fetch only degrades the prompt; the session is editable
    /// either way. Sessions idle past [`SESSION_IDLE_MS`] are dropped first;
    /// their draft slots are left as they are.
    pub async fn open(
        &self,
        question_id: &str,
        course_ref: &str,
        assignment_ref: &str,
    ) -> Result<SessionSnapshot, EditorError> {
        let id = Uuid::new_v4();
        let now = self.clock.now_millis();
        {
            let mut sessions = self.sessions.lock().await;
            let before = sessions.len();
            sessions.retain(|_, s| !s.is_idle(now, SESSION_IDLE_MS));
            let evicted = before - sessions.len();
            if evicted > 0 {
                tracing::info!(evicted, "Dropped idle editor sessions");
            }
            sessions.insert(
                id,
                EditorSession::new(id, question_id, course_ref, assignment_ref, now),
            );
        }

        let prompt_text = match load_question(self.questions.as_ref(), question_id).await {
            Ok(view) => view.prompt_text,
            Err(e) => {
                tracing::warn!(question_id, "Question load failed: {}", e);
                fallback_prompt(&e).to_string()
            }
        };
        let restored =
            restore_draft(self.drafts.as_ref(), question_id, self.clock.now_millis()).await;

        self.with_session(id, |s| {
            s.finish_loading(prompt_text, restored);
            tracing::info!(%id, question_id, "Editor session opened");
            Ok(s.snapshot())
        })
        .await
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, EditorError> {
        self.with_session(id, |s| Ok(s.snapshot())).await
    }

    /// Discards a session. Results arriving for it afterwards are dropped.
    pub async fn close(&self, id: Uuid) -> Result<(), EditorError> {
        if self.sessions.lock().await.remove(&id).is_none() {
            return Err(EditorError::SessionNotFound(id));
        }
        tracing::info!(%id, "Editor session closed");
        Ok(())
    }

    /// Applies a change event and rewrites the draft slot.
    ///
    /// A submit cannot record its result while the draft write is pending,
    /// so an edit rejected for a finished session never touches the slot.
    pub async fn edit(&self, id: Uuid, source_text: String) -> Result<EditAck, EditorError> {
        let gate = self.with_session(id, |s| Ok(s.write_gate())).await?;
        let _writing = gate.read().await;

        let question_id = self
            .with_session(id, |s| {
                if s.state() == SessionState::Submitted {
                    return Err(EditorError::AlreadySubmitted);
                }
                Ok(s.question_id().to_string())
            })
            .await?;

        let expires_at = save_draft(
            self.drafts.as_ref(),
            &question_id,
            &source_text,
            self.clock.now_millis(),
        )
        .await;

        self.with_session(id, |s| s.apply_edit(source_text, expires_at))
            .await?;

        Ok(EditAck {
            draft_saved: expires_at.is_some(),
            draft_expires_at: expires_at,
        })
    }

    pub async fn keystroke(&self, id: Uuid, event: KeyEvent) -> Result<KeystrokeVerdict, EditorError> {
        self.with_session(id, |s| s.apply_keystroke(&event)).await
    }

    pub async fn dismiss_activity(&self, id: Uuid) -> Result<SessionSnapshot, EditorError> {
        self.with_session(id, |s| {
            s.dismiss_activity();
            Ok(s.snapshot())
        })
        .await
    }

    /// Uploads the session's current text.
    ///
    /// Rejects a second call while one is in flight. Failures are returned
    /// as an unsuccessful outcome and leave the session editable. A
    /// successful upload retires the session.
    pub async fn submit(&self, id: Uuid) -> Result<SubmitOutcome, EditorError> {
        let (request, listing_path) = self
            .with_session(id, |s| Ok((s.begin_submit()?, s.listing_path())))
            .await?;
        let question_id = request.question_id.clone();

        let outcome = match self.intake.submit_code(request).await {
            Ok(response) if response.success => SubmitOutcome::accepted(listing_path),
            Ok(_) => {
                tracing::warn!(%id, question_id = %question_id, "Submission rejected by platform");
                SubmitOutcome::rejected()
            }
            Err(e) => {
                tracing::error!(%id, question_id = %question_id, "Error submitting code: {}", e);
                SubmitOutcome::errored()
            }
        };

        let gate = self.sessions.lock().await.get(&id).map(EditorSession::write_gate);
        if let Some(gate) = gate {
            let _recording = gate.write().await;
            let mut sessions = self.sessions.lock().await;
            let retired = match sessions.get_mut(&id) {
                Some(session) => {
                    session.finish_submit(&outcome);
                    session.state() == SessionState::Submitted
                }
                None => false,
            };
            if retired {
                sessions.remove(&id);
            }
        } else {
            tracing::debug!(%id, "Session closed during upload, result dropped");
        }

        if outcome.success {
            tracing::info!(%id, question_id = %question_id, "Code submitted");
        }
        Ok(outcome)
    }

    async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut EditorSession) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        let now = self.clock.now_millis();
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(EditorError::SessionNotFound(id))?;
        session.touch(now);
        f(session)
    }
}
