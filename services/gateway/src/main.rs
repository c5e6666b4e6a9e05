use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minutes_gateway::config::Config;
use minutes_gateway::create_app;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("Starting minutes gateway on {}:{}", config.host, config.port);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = create_app(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
