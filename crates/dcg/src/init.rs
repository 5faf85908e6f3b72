//! Gateway Initialization
//!
//! Startup, wiring of the composed services onto the runtime surface, and
//! graceful shutdown. Composition failures surface here before the
//! listener ever binds, so a misbuilt binary dies with a diagnosable
//! error instead of serving half a gateway.

use std::path::Path;
use std::time::Duration;

use dcg_infrastructure::ErrorContext;
use dcg_infrastructure::config::{ConfigLoader, GatewayConfig};
use dcg_infrastructure::constants::GRACEFUL_SHUTDOWN_TIMEOUT_SECS;
use dcg_infrastructure::di::{GatewayContext, init_gateway};
use dcg_infrastructure::logging::init_logging;
use futures::StreamExt;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::listener::serve_connection;

/// Run the gateway
///
/// Loads configuration, initializes logging, composes the container and
/// serves the control listener until a shutdown signal arrives. With
/// `check_only` set, composition still runs but the gateway prints the
/// resolved binding set and exits instead of serving.
pub async fn run(
    config_path: Option<&Path>,
    check_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    if check_only {
        return check_bindings(config);
    }

    init_logging(&config.logging)?;
    let context = init_gateway(config)?;
    serve(&context).await
}

/// Load configuration from an optional explicit path
fn load_config(config_path: Option<&Path>) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Compose the container and print what each role resolved to
fn check_bindings(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let context = init_gateway(config)?;

    println!("Composed bindings:");
    for (role, name) in context.container().binding_summary() {
        println!("  {:<24} {}", role.as_str(), name);
    }
    Ok(())
}

/// Serve the control listener until shutdown
async fn serve(context: &GatewayContext) -> Result<(), Box<dyn std::error::Error>> {
    let container = context.container();
    let control = container.control_service()?;
    let events = container.events_service()?;

    let mut event_stream = events.subscribe().await?;
    let event_logger = tokio::spawn(async move {
        while let Some(event) = event_stream.next().await {
            info!(event = ?event, "Channel event");
        }
    });

    let addr = context.config().control.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .network_context(format!("Failed to bind control listener on {addr}"))?;
    info!(addr = %addr, "Control listener started");

    let mut connections = JoinSet::new();
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    info!(peer = %peer, "Control connection accepted");
                    connections.spawn(serve_connection(stream, control.clone(), events.clone()));
                }
                Err(err) => warn!(error = %err, "Failed to accept control connection"),
            },
            Some(_) = connections.join_next() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    drop(listener);
    let drain = async {
        while connections.join_next().await.is_some() {}
    };
    if tokio::time::timeout(Duration::from_secs(GRACEFUL_SHUTDOWN_TIMEOUT_SECS), drain)
        .await
        .is_err()
    {
        warn!("Shutdown timeout reached with control connections still open");
        connections.abort_all();
    }
    event_logger.abort();
    info!("Gateway stopped");
    Ok(())
}
