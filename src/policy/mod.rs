use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::telemetry::{SensorColor, Telemetry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    #[serde(rename = "fwd")]
    Forward,
    #[serde(rename = "rev")]
    Reverse,
}

/// One movement command, produced fresh each cycle. `altitude` is a delta
/// for this cycle, not an absolute target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub speed: i32,
    pub altitude: i32,
    pub movement: Movement,
}

impl Command {
    pub fn new(speed: i32, altitude: i32, movement: Movement) -> Self {
        Self {
            speed,
            altitude,
            movement,
        }
    }

    /// Sent once at session start, before any telemetry has arrived.
    pub fn handshake() -> Self {
        Self::new(0, 0, Movement::Forward)
    }
}

/// Map one reading to the next command. Pure and total: every `Telemetry`
/// value produces a command, including NaN/infinite readings (NaN
/// comparisons are false, so those fall through to the default path).
///
/// Rules form an ordered priority chain, most critical first. The first
/// match returns immediately; later rules never see the reading.
pub fn decide(t: &Telemetry, cfg: &Config) -> Command {
    let tilt = t.tilt();

    // 1. Critical battery: full thrust forward, climb a step, ignore hazards.
    if t.battery <= cfg.critical_battery {
        return Command::new(5, 1, Movement::Forward);
    }

    // 2. Critical tilt: kill thrust, descend only if actually airborne.
    if tilt > cfg.tilt_critical {
        let altitude = if t.y > 1.0 { -1 } else { 0 };
        return Command::new(0, altitude, Movement::Forward);
    }

    // 3. Red sensor at unsafe altitude: slow descent.
    if t.color() == SensorColor::Red && t.y >= cfg.safe_alt_for_red {
        return Command::new(2, -1, Movement::Forward);
    }

    // 4. Yellow sensor way up high: drop fast.
    if t.color() == SensorColor::Yellow && t.y > 100.0 {
        return Command::new(3, -2, Movement::Forward);
    }

    // 5. Severe environment.
    if t.wind > 60.0 || t.dust > 60.0 {
        warn!(wind = t.wind, dust = t.dust, "severe wind/dust, holding position");
        // Gust delta measured against the same reading. The core keeps no
        // cycle history, so this never trips and the branch always
        // hover-climbs. Kept as-is; fixing it would change observable
        // behavior (sometimes reversing instead of hovering).
        if (t.wind - t.wind) >= 20.0 || (t.dust - t.dust) >= 20.0 {
            return Command::new(0, 0, Movement::Reverse);
        }
        return Command::new(1, 1, Movement::Forward);
    }

    // 6. Moderate environment: weave altitude by parity of x.
    if t.wind > 40.0 || t.dust > 40.0 {
        let altitude = if x_is_even(t.x) { 1 } else { -1 };
        return Command::new(2, altitude, Movement::Forward);
    }

    // 7. Default path: full cruise, then trimmed by the softer conditions.
    let mut command = Command::new(5, 2, Movement::Forward);

    if t.battery < cfg.low_battery {
        command.speed = command.speed.min(2);
    }

    if t.color() == SensorColor::Green
        && 2.0 < t.y
        && t.y < 18.0
        && tilt < 0.25
        && t.battery > 35.0
        && t.wind < 30.0
        && t.dust < 30.0
    {
        command = Command::new(4, 2, Movement::Forward);
    }

    if t.color() == SensorColor::Yellow {
        let altitude = if x_is_even(t.x) { 0 } else { 1 };
        return Command::new(1, altitude, Movement::Forward);
    }

    if t.color() == SensorColor::Red {
        command.altitude = command.altitude.min(2);
    }

    // Course end: stop and back off.
    if t.x >= 1000.0 {
        return Command::new(0, 0, Movement::Reverse);
    }

    command
}

/// Parity on the raw float position: even exactly when `x % 2 == 0`, so a
/// fractional x counts as odd.
fn x_is_even(x: f64) -> bool {
    x % 2.0 == 0.0
}
