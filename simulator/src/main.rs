use anyhow::Context;
use bridge::{routes, ServiceState};
use clap::Parser;
use generator::charts::ChartSource;
use log::{info, warn};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

mod bridge;
mod generator;

#[derive(Parser)]
#[command(author, version, about = "Local stand-in for the COVID-19 prediction services")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
    /// Directory of pre-rendered `<chart_slug>.png` files
    #[arg(long)]
    graphs: Option<PathBuf>,
    /// Answer every prediction with HTTP 500 and a message
    #[arg(long, default_value_t = false)]
    fail_predictions: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = &args.graphs {
        anyhow::ensure!(dir.is_dir(), "graphs directory {} not found", dir.display());
    }

    let state = Arc::new(ServiceState {
        charts: ChartSource::new(args.graphs),
        fail_predictions: args.fail_predictions,
    });

    let (addr, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(args.bind, async {
            if let Err(err) = signal::ctrl_c().await {
                warn!("cannot listen for Ctrl+C, shutting down: {err}");
            }
        })
        .with_context(|| format!("binding {}", args.bind))?;

    info!("simulator listening on http://{addr} (Ctrl+C to stop)");
    server.await;
    info!("simulator stopped");
    Ok(())
}
