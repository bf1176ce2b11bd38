// src/main.rs

use std::sync::Arc;

use codelab::{
    api::PlatformClient,
    config::Config,
    editor::{EditorService, SystemClock},
    routes,
    state::AppState,
    store::SqliteDraftStore,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env is read inside)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "codelab.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let drafts = SqliteDraftStore::connect(&config.draft_database_url, 5).await?;
    tracing::info!("Draft store ready at {}", config.draft_database_url);

    let platform = Arc::new(PlatformClient::new(config.api_base_url.clone()));
    tracing::info!("Using CodeLab API at {}", platform.base_url());

    let editor = EditorService::new(
        platform.clone(),
        platform.clone(),
        Arc::new(drafts),
        Arc::new(SystemClock),
    );

    let state = AppState {
        editor: Arc::new(editor),
        roster: platform,
    };

    let app = routes::create_router(state, &config.cors_origins);

    tracing::info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
