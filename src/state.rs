use std::sync::Arc;

use axum::extract::FromRef;

use crate::{api::RosterSource, editor::EditorService};

#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<EditorService>,
    pub roster: Arc<dyn RosterSource>,
}

impl FromRef<AppState> for Arc<EditorService> {
    fn from_ref(state: &AppState) -> Self {
        state.editor.clone()
    }
}

impl FromRef<AppState> for Arc<dyn RosterSource> {
    fn from_ref(state: &AppState) -> Self {
        state.roster.clone()
    }
}
