//! Server binary for the clinic portal REST API.
//!
//! # Environment Variables
//! - `CLINIC_ADDR`: listen address (default: "0.0.0.0:3000")
//! - `CLINIC_DATA_FILE`: consultation store path (default: "consultations.json")
//! - `CLINIC_STATIC_DIR`: static asset directory, served as the router
//!   fallback when it exists (default: "public")
//! - `OPENAI_API_KEY`: upstream completion API key; when unset the chat
//!   endpoint is disabled and answers 500
//! - `CLINIC_CHAT_MODEL`: upstream model (default: "gpt-3.5-turbo")

use api_rest::{router, AppState};
use clinic_chat::{CompletionClient, DEFAULT_MODEL};
use clinic_core::{config, ConsultationService, CoreConfig};
use clinic_types::NonEmptyText;
use std::path::Path;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("clinic_core=info".parse()?)
                .add_directive("clinic_chat=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CLINIC_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file = config::resolve_data_file(std::env::var("CLINIC_DATA_FILE").ok());
    let cfg = CoreConfig::new(data_file);

    tracing::info!("++ Consultation store at {}", cfg.data_file().display());

    let consultations = ConsultationService::new(&cfg);
    let chat = build_chat_client()?;

    let app = router(AppState {
        consultations,
        chat,
    });

    // Serve the browser frontend when a static directory is present,
    // mirroring the portal's original deployment layout.
    let static_dir = std::env::var("CLINIC_STATIC_DIR").unwrap_or_else(|_| "public".into());
    let app = if Path::new(&static_dir).is_dir() {
        tracing::info!("++ Serving static assets from {static_dir}");
        app.fallback_service(ServeDir::new(&static_dir))
    } else {
        app
    };

    tracing::info!("++ Starting clinic REST on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the upstream completion client, or `None` when no API key is
/// configured (the chat endpoint then reports itself unavailable).
fn build_chat_client() -> anyhow::Result<Option<CompletionClient>> {
    let Some(api_key) = std::env::var("OPENAI_API_KEY")
        .ok()
        .and_then(|key| NonEmptyText::new(key).ok())
    else {
        tracing::warn!("OPENAI_API_KEY is not set; /api/chat will be unavailable");
        return Ok(None);
    };

    let model = match std::env::var("CLINIC_CHAT_MODEL")
        .ok()
        .and_then(|model| NonEmptyText::new(model).ok())
    {
        Some(model) => model,
        None => NonEmptyText::new(DEFAULT_MODEL)?,
    };

    tracing::info!("++ Chat proxy enabled (model: {model})");
    Ok(Some(CompletionClient::new(&api_key, &model)?))
}
