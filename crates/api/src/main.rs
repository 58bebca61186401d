use anyhow::Context;

use carmarket_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    carmarket_observability::init(config.log_format);

    if config.admin_token.is_none() {
        tracing::warn!("CARMARKET_ADMIN_TOKEN not set; admin routes are open");
    }

    let app = carmarket_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
