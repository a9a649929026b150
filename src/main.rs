use country_search::config::Config;
use country_search::server::{serve, shutdown_signal};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "country_search=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::load()?;
    info!("Country search service starting with config: {cfg:?}");

    let app = country_search::app(&cfg)?;
    let listener = TcpListener::bind(&cfg.listen_addr).await?;

    serve(listener, app, cfg.shutdown_timeout(), shutdown_signal()).await?;

    Ok(())
}
