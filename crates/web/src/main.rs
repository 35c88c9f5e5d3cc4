use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use propflow_web::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let addr: SocketAddr = std::env::var("PROPFLOW_WEB_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let (app, report) = app::showcase();
    for failure in &report.failures {
        warn!(component = %failure.component, error = %failure.error, "showcase component skipped");
    }
    info!(
        "Starting Propflow showcase on http://{} ({} components)",
        addr,
        app.context().len()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    propflow_web::serve(listener, Arc::new(app)).await?;
    Ok(())
}
