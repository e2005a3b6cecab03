use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::policy::{decide, Command};
use crate::telemetry::decode;
use crate::view::{ViewAction, ViewHook};

/// One inbound frame from the transport. Deserializing an arbitrary JSON
/// object leaves unknown shapes with every field `None`, which the loop
/// skips without sending a command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<String>,
}

impl ServerMessage {
    pub fn telemetry(raw: impl Into<String>) -> Self {
        Self {
            telemetry: Some(raw.into()),
            ..Self::default()
        }
    }

    pub fn crashed(metrics: Option<Value>) -> Self {
        Self {
            status: Some("crashed".to_string()),
            metrics,
            ..Self::default()
        }
    }

    fn is_crashed(&self) -> bool {
        self.status.as_deref() == Some("crashed")
    }
}

/// How a session ended. `Disconnected` is the only outcome worth retrying.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Terminal status from the simulator, with its flight summary if any.
    Crashed { metrics: Option<Value> },
    /// The view hook asked to quit.
    ViewClosed,
    /// The driver's cancellation token fired (e.g. Ctrl+C).
    Cancelled,
    /// The transport channel closed underneath us.
    Disconnected,
}

/// One flight session: receive telemetry, decode, decide, send the command,
/// pause, repeat. Holds no state across cycles beyond the view's display
/// buffer; each cycle is independent.
pub struct Session<V> {
    inbound: mpsc::Receiver<ServerMessage>,
    outbound: mpsc::Sender<Command>,
    config: Config,
    view: V,
    cancel: CancellationToken,
}

impl<V: ViewHook> Session<V> {
    pub fn new(
        inbound: mpsc::Receiver<ServerMessage>,
        outbound: mpsc::Sender<Command>,
        config: Config,
        view: V,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            inbound,
            outbound,
            config,
            view,
            cancel,
        }
    }

    pub async fn run(mut self) -> SessionOutcome {
        // Handshake goes out before any telemetry is consumed.
        if self.outbound.send(Command::handshake()).await.is_err() {
            return SessionOutcome::Disconnected;
        }

        loop {
            let message = tokio::select! {
                _ = self.cancel.cancelled() => return SessionOutcome::Cancelled,
                message = self.inbound.recv() => match message {
                    Some(message) => message,
                    None => return SessionOutcome::Disconnected,
                },
            };

            if message.is_crashed() {
                info!("drone crashed, session over");
                if let Some(metrics) = &message.metrics {
                    info!(%metrics, "flight summary");
                }
                return SessionOutcome::Crashed {
                    metrics: message.metrics,
                };
            }

            let Some(raw) = message.telemetry else {
                // Unknown shape. Skip, no command this cycle.
                continue;
            };

            let telemetry = match decode(&raw) {
                Ok(telemetry) => telemetry,
                Err(err) => {
                    warn!(%err, raw, "failed to decode telemetry, skipping cycle");
                    continue;
                }
            };

            let tilt = telemetry.tilt();
            if self.view.on_cycle(&telemetry, tilt) == ViewAction::Quit {
                return SessionOutcome::ViewClosed;
            }

            let command = decide(&telemetry, &self.config);
            if self.outbound.send(command).await.is_err() {
                return SessionOutcome::Disconnected;
            }

            if !self.config.cycle_pause.is_zero() {
                tokio::time::sleep(self.config.cycle_pause).await;
            }
        }
    }
}
