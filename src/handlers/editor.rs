// src/handlers/editor.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    editor::EditorService,
    error::AppError,
    models::{
        activity::KeyEvent,
        submission::{EditRequest, OpenSessionRequest},
    },
};

/// Opens an editor session for a question.
///
/// Loads the question text and restores a live draft. A failed question
/// fetch still returns 201 with a fallback prompt.
pub async fn open_session(
    State(editor): State<Arc<EditorService>>,
    Json(payload): Json<OpenSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let snapshot = editor
        .open(
            &payload.question_id,
            &payload.course_ref,
            &payload.assignment_ref,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn get_session(
    State(editor): State<Arc<EditorService>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(editor.snapshot(id).await?))
}

pub async fn close_session(
    State(editor): State<Arc<EditorService>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    editor.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change event from the editor. Rewrites the draft on every call.
pub async fn update_code(
    State(editor): State<Arc<EditorService>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let ack = editor.edit(id, payload.source_text).await?;
    Ok(Json(ack))
}

/// Key-down event from the editor. Tells the browser whether to suppress it.
pub async fn observe_keystroke(
    State(editor): State<Arc<EditorService>>,
    Path(id): Path<Uuid>,
    Json(event): Json<KeyEvent>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(editor.keystroke(id, event).await?))
}

pub async fn dismiss_activity(
    State(editor): State<Arc<EditorService>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(editor.dismiss_activity(id).await?))
}

/// Submits the session's code to the platform.
///
/// Both accepted and failed uploads answer 200 with the notice to show;
/// 409 means a submission is in flight or already done.
pub async fn submit(
    State(editor): State<Arc<EditorService>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(editor.submit(id).await?))
}
