use skylink::config::Config;
use skylink::session::{Session, SessionOutcome};
use skylink::sim::FlightSim;
use skylink::view::ConsoleView;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("skylink control client starting");

    let config = Config::from_env()?;

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, shutting down");
            ctrl_c_cancel.cancel();
        }
    });

    // Connect-run-retry loop. Each pass wires a fresh session against the
    // in-process simulator; a real deployment swaps the sim task for a
    // network transport feeding the same channels.
    loop {
        let (telemetry_tx, telemetry_rx) = mpsc::channel(100);
        let (command_tx, command_rx) = mpsc::channel(100);

        let sim = FlightSim::new(command_rx, telemetry_tx, cancel.clone());
        let sim_task = tokio::spawn(sim.run());
        tracing::info!("connected to drone simulator");

        let session = Session::new(
            telemetry_rx,
            command_tx,
            config.clone(),
            ConsoleView::new(),
            cancel.clone(),
        );

        let outcome = session.run().await;
        let _ = sim_task.await;

        match outcome {
            SessionOutcome::Crashed { .. } => {
                tracing::info!("flight over");
                return Ok(());
            }
            SessionOutcome::ViewClosed | SessionOutcome::Cancelled => return Ok(()),
            SessionOutcome::Disconnected => {
                tracing::warn!("connection closed, reconnecting...");
                tokio::time::sleep(config.reconnect_delay).await;
            }
        }
    }
}
