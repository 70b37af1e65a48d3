use eyre::Result;
use tracing_subscriber::EnvFilter;

use equilibrar_server::config;
use equilibrar_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::load_config()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let state = AppState::new(&config)?;
    let app = equilibrar_server::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind.as_str())
        .await
        .map_err(|e| eyre::eyre!("failed to bind {}: {e}", config.bind))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        time_zone = %config.time_zone,
        locale = ?config.locale,
        "equilibrar listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
