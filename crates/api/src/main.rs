use anyhow::Context;
use renohub_api::{router, AppState};
use renohub_infra::config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("renohub=info,tower_http=info")),
        )
        .init();

    let config = config::load().context("loading configuration")?;
    let addr = format!("0.0.0.0:{}", config.port);

    let state = AppState::from_config(config).context("building application state")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "renohub listening");
    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}
