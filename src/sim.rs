//! In-process flight simulator. Stands in for the external drone simulator
//! so the binary and the integration tests have something to fly against.
//! Nothing in here is part of the control core.

use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::policy::{Command, Movement};
use crate::session::ServerMessage;
use crate::telemetry::Telemetry;

/// Render a reading back into the record grammar the decoder consumes.
/// Finite values only; `f64`'s `Display` never produces an exponent, so the
/// output always re-decodes.
pub fn encode(t: &Telemetry) -> String {
    let (gx, gy, gz) = t.gyroscope;
    format!(
        "X-{}-Y-{}-BAT-{}-GYR-[{}, {}, {}]-WIND-{}-DUST-{}-SENS-{}",
        t.x, t.y, t.battery, gx, gy, gz, t.wind, t.dust, t.sensor
    )
}

/// Toy flight model: integrates commands into position and battery drain,
/// wanders wind and dust deterministically, and reports a crash with summary
/// metrics once the battery is gone.
pub struct FlightSim {
    commands: mpsc::Receiver<Command>,
    outbound: mpsc::Sender<ServerMessage>,
    cancel: CancellationToken,
    x: f64,
    y: f64,
    battery: f64,
    cycle: u64,
}

impl FlightSim {
    pub fn new(
        commands: mpsc::Receiver<Command>,
        outbound: mpsc::Sender<ServerMessage>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            commands,
            outbound,
            cancel,
            x: 0.0,
            y: 5.0,
            battery: 100.0,
            cycle: 0,
        }
    }

    pub async fn run(mut self) {
        loop {
            let command = tokio::select! {
                _ = self.cancel.cancelled() => return,
                command = self.commands.recv() => match command {
                    Some(command) => command,
                    None => return,
                },
            };

            let message = self.step(command);
            let terminal = message.status.is_some();
            if self.outbound.send(message).await.is_err() {
                return;
            }
            if terminal {
                return;
            }
        }
    }

    /// Apply one command and produce the next frame.
    fn step(&mut self, command: Command) -> ServerMessage {
        self.cycle += 1;
        let speed = f64::from(command.speed);
        match command.movement {
            Movement::Forward => self.x += 2.0 * speed,
            Movement::Reverse => self.x -= 2.0 * speed,
        }
        self.y = (self.y + f64::from(command.altitude)).max(0.0);
        self.battery -= 0.4 + 0.12 * speed;

        if self.battery <= 0.0 {
            return ServerMessage::crashed(Some(json!({
                "cycles": self.cycle,
                "distance": self.x,
                "cause": "battery exhausted",
            })));
        }

        let phase = self.cycle as f64;
        let wind = 25.0 + 22.0 * (phase * 0.13).sin();
        let dust = 20.0 + 18.0 * (phase * 0.07 + 1.0).sin();
        let severity = wind.max(dust);
        let sensor = if severity > 60.0 {
            "RED"
        } else if severity > 40.0 {
            "YELLOW"
        } else {
            "GREEN"
        };

        let telemetry = Telemetry {
            x: round2(self.x),
            y: round2(self.y),
            battery: round2(self.battery),
            gyroscope: (
                round2(0.05 * (phase * 0.3).sin()),
                round2(0.04 * (phase * 0.3).cos()),
                0.0,
            ),
            wind: round2(wind),
            dust: round2(dust),
            sensor: sensor.to_string(),
        };

        debug!(cycle = self.cycle, x = telemetry.x, y = telemetry.y, "sim frame");
        ServerMessage::telemetry(encode(&telemetry))
    }
}

// Keeps the encoded records short; Display would otherwise spell out the
// full binary fraction of the sines.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
