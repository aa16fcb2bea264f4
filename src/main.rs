use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bordeaux_matching_engine::api::{create_router, AppState};
use bordeaux_matching_engine::config::Settings;
use bordeaux_matching_engine::metrics::install_exporter;
use bordeaux_matching_engine::{EngineHandle, MatchingEngine};

#[derive(Parser, Debug)]
#[command(name = "matching-engine")]
struct Args {
    #[arg(long, default_value = "config/engine.yaml")]
    config: String,
    /// Overrides `server.listen_addr` from the config.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();
    let mut settings = Settings::load(&args.config)?;
    if let Some(listen) = args.listen {
        settings.server.listen_addr = listen;
    }
    if let Some(addr) = settings.metrics.listen_addr.as_deref() {
        let addr = install_exporter(addr)?;
        info!(%addr, "prometheus exporter listening");
    }

    let (engine, engine_task) = EngineHandle::spawn(MatchingEngine::new(), settings.engine.command_buffer);
    let app = create_router(AppState::new(engine));

    let listener = TcpListener::bind(&settings.server.listen_addr).await?;
    info!(addr = %listener.local_addr()?, "http server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("http server stopped");
    engine_task.await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
