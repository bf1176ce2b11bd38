// src/models/draft.rs

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Lifetime of a draft after the last edit, in milliseconds (5 minutes).
pub const DRAFT_TTL_MS: i64 = 300_000;

/// Separator used by drafts written before the JSON encoding.
const LEGACY_DELIMITER: &str = "|||";

/// A locally persisted, time-limited snapshot of in-progress code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// Absolute expiry as Unix epoch milliseconds.
    pub expires_at: i64,
    pub source_text: String,
}

impl DraftRecord {
    /// Builds the record written for an edit made at `now`.
    pub fn from_edit(source_text: impl Into<String>, now: i64) -> Self {
        Self {
            expires_at: now.saturating_add(DRAFT_TTL_MS),
            source_text: source_text.into(),
        }
    }

    /// Storage key for a question's draft slot.
    pub fn storage_key(question_id: &str) -> String {
        format!("{}_code", question_id)
    }

    pub fn is_live(&self, now: i64) -> bool {
        now < self.expires_at
    }

    /// Field order is fixed by the struct, so the output is deterministic.
    pub fn encode(&self) -> Result<String, EditorError> {
        serde_json::to_string(self).map_err(|e| EditorError::Storage(e.to_string()))
    }

    /// Parses a stored value.
    ///
    /// Accepts the JSON encoding and the older `"<millis>|||<text>"` form.
    /// Everything else is reported as `MalformedDraft`.
    pub fn decode(raw: &str) -> Result<Self, EditorError> {
        if raw.trim_start().starts_with('{') {
            return serde_json::from_str(raw)
                .map_err(|e| EditorError::MalformedDraft(e.to_string()));
        }

        let (expires_at, source_text) = raw
            .split_once(LEGACY_DELIMITER)
            .ok_or_else(|| EditorError::MalformedDraft("missing delimiter".to_string()))?;
        let expires_at = expires_at
            .trim()
            .parse::<i64>()
            .map_err(|e| EditorError::MalformedDraft(format!("bad expiry: {}", e)))?;

        Ok(Self {
            expires_at,
            source_text: source_text.to_string(),
        })
    }
}
