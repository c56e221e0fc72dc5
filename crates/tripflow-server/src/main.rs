#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;

use tripflow_ai::OpenAIClient;
use tripflow_server::api::{self, AppState};
use tripflow_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tripflow_server=debug".into()),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!(model = %config.model, "Starting TripFlow relay");

    let llm = OpenAIClient::new(&config.api_key)
        .with_model(&config.model)
        .with_base_url(&config.base_url);
    let state = AppState::new(Arc::new(llm));

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        "TripFlow relay running on http://{}:{}",
        config.host,
        config.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
