// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{editor, roster},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Editor session routes under `/api/sessions`.
/// * Author submission roster under `/api/assignments`.
/// * Global middleware (Trace, CORS) for the browser origins given.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let session_routes = Router::new()
        .route("/", post(editor::open_session))
        .route(
            "/{id}",
            get(editor::get_session).delete(editor::close_session),
        )
        .route("/{id}/code", put(editor::update_code))
        .route("/{id}/keystrokes", post(editor::observe_keystroke))
        .route("/{id}/activity", delete(editor::dismiss_activity))
        .route("/{id}/submit", post(editor::submit));

    let assignment_routes =
        Router::new().route("/{id}/submissions", get(roster::list_submissions));

    Router::new()
        .nest("/api/sessions", session_routes)
        .nest("/api/assignments", assignment_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
