use std::sync::Arc;

use anyhow::Context;
use deduction_assistant::{
    config::{Config, StoreSettings},
    routes,
    services::{
        assistant::DeductionAssistant,
        completion::OpenAiCompletion,
        lookup::{EmployeeDirectory, UnavailableDirectory},
        mongo_store::MongoDirectory,
    },
    state::AppState,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let directory = open_directory(&config.store).await;
    if config.completion.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; completion calls will fail");
    }
    let completion = OpenAiCompletion::new(config.completion.clone())?;

    let assistant = DeductionAssistant::new(directory, Arc::new(completion))
        .with_persona(config.persona.clone())
        .consult_model_without_deduction(config.consult_model_without_deduction);
    let state = Arc::new(AppState::new(assistant));

    let app = routes::create_router(&config.static_dir).with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server is running on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}

/// A missing or unusable store never stops the server; lookups then fail
/// with a "store unavailable" error instead.
async fn open_directory(store: &StoreSettings) -> Arc<dyn EmployeeDirectory> {
    let Some(url) = store.url.as_deref() else {
        warn!("MONGO_URL is not set; lookups will fail");
        return Arc::new(UnavailableDirectory::new("MONGO_URL is not set"));
    };

    match MongoDirectory::connect(url, &store.database, store.timeout).await {
        Ok(directory) => {
            match directory.ping().await {
                Ok(()) => info!(database = %store.database, "Connected to MongoDB successfully"),
                Err(e) => error!(error = %e, "Failed to connect to MongoDB"),
            }
            Arc::new(directory)
        }
        Err(e) => {
            error!(error = %e, "Failed to connect to MongoDB");
            Arc::new(UnavailableDirectory::new(e.to_string()))
        }
    }
}
