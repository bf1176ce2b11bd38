// src/editor/drafts.rs

use crate::{models::draft::DraftRecord, store::DraftStore};

/// Recovers the live draft for a question, or `""` when there is none.
///
/// Missing, expired, malformed and unreadable slots all count as "no draft".
pub async fn restore_draft(store: &dyn DraftStore, question_id: &str, now: i64) -> String {
    let key = DraftRecord::storage_key(question_id);

    let raw = match store.get(&key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return String::new(),
        Err(e) => {
            tracing::warn!(question_id, "Draft unavailable, starting empty: {}", e);
            return String::new();
        }
    };

    match DraftRecord::decode(&raw) {
        Ok(record) if record.is_live(now) => record.source_text,
        Ok(record) => {
            tracing::debug!(question_id, expires_at = record.expires_at, "Draft expired");
            String::new()
        }
        Err(e) => {
            tracing::warn!(question_id, "Discarding draft: {}", e);
            String::new()
        }
    }
}

/// Persists the editor contents after a change at `now`.
///
/// Returns the new expiry, or `None` if the write failed. A failed write
/// never fails the edit itself.
pub async fn save_draft(
    store: &dyn DraftStore,
    question_id: &str,
    source_text: &str,
    now: i64,
) -> Option<i64> {
    let record = DraftRecord::from_edit(source_text, now);
    let written = match record.encode() {
        Ok(value) => store.put(&DraftRecord::storage_key(question_id), &value).await,
        Err(e) => Err(e),
    };

    match written {
        Ok(()) => Some(record.expires_at),
        Err(e) => {
            tracing::warn!(question_id, "Draft not saved: {}", e);
            None
        }
    }
}
