// src/handlers/roster.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{
    api::RosterSource,
    error::{AppError, EditorError},
    models::{
        roster::{RosterSort, SubmissionEntry},
        validate_identifier,
    },
    utils::bearer::BearerToken,
};

/// Fetches an assignment's submissions and orders them for display.
pub async fn fetch_roster(
    source: &dyn RosterSource,
    assignment_id: &str,
    bearer_token: &str,
    sort: RosterSort,
) -> Result<Vec<SubmissionEntry>, EditorError> {
    let mut entries = source
        .fetch_roster(assignment_id, bearer_token)
        .await?
        .sub_details
        .unwrap_or_default();
    sort.apply(&mut entries);
    Ok(entries)
}

/// Lists student submissions for an assignment (author view).
pub async fn list_submissions(
    State(roster): State<Arc<dyn RosterSource>>,
    BearerToken(token): BearerToken,
    Path(assignment_id): Path<String>,
    Query(sort): Query<RosterSort>,
) -> Result<impl IntoResponse, AppError> {
    validate_identifier(&assignment_id)
        .map_err(|_| AppError::BadRequest("Invalid assignment id".to_string()))?;

    let entries = fetch_roster(roster.as_ref(), &assignment_id, &token, sort)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch student list: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(entries))
}
