use anyhow::Context;

use bookrec::api::{create_router, AppState, QuerySettings};
use bookrec::config::Config;
use bookrec::data::Catalog;
use bookrec::services::Normalizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = Config::from_env()?;
    tracing::info!(
        books = %config.books_path.display(),
        ratings = %config.ratings_path.display(),
        min_ratings = config.min_ratings,
        "Loading catalog"
    );

    // The catalog must be complete before the listener is bound
    let normalizer = Normalizer::new().context("compile normalizer patterns")?;
    let catalog = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || {
            Catalog::load(
                &normalizer,
                &config.books_path,
                &config.ratings_path,
                config.min_ratings,
            )
        })
        .await
        .context("catalog loader task")??
    };

    let state = AppState::new(catalog, QuerySettings::from(&config));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("bind {address}"))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
