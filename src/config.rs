use std::time::Duration;

use anyhow::Context;

/// Process-wide flight thresholds and pacing. Built once at startup and
/// passed by reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_safe_altitude: i32,
    pub max_speed: i32,
    pub min_altitude: i32,
    /// Gyroscope norm above which the vehicle is considered critically
    /// tilted. 45 degrees, in radians.
    pub tilt_critical: f64,
    pub low_battery: f64,
    pub critical_battery: f64,
    pub safe_alt_for_red: f64,
    /// Pause between decision cycles. Tests set this to zero.
    pub cycle_pause: Duration,
    /// Delay before the driver retries a dropped connection.
    pub reconnect_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_safe_altitude: 3,
            max_speed: 5,
            min_altitude: 1,
            tilt_critical: 45f64.to_radians(),
            low_battery: 20.0,
            critical_battery: 10.0,
            safe_alt_for_red: 2.8,
            cycle_pause: Duration::from_secs(1),
            reconnect_delay: Duration::from_secs(2),
        }
    }
}

impl Config {
    /// Defaults with pacing overridable from the environment:
    /// `SKYLINK_CYCLE_PAUSE_MS` and `SKYLINK_RECONNECT_DELAY_MS`.
    /// Thresholds are not overridable; they are part of the contract with
    /// the simulator.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(ms) = env_ms("SKYLINK_CYCLE_PAUSE_MS")? {
            config.cycle_pause = ms;
        }
        if let Some(ms) = env_ms("SKYLINK_RECONNECT_DELAY_MS")? {
            config.reconnect_delay = ms;
        }
        Ok(config)
    }
}

fn env_ms(key: &str) -> anyhow::Result<Option<Duration>> {
    match std::env::var(key) {
        Ok(raw) => {
            let ms: u64 = raw
                .parse()
                .with_context(|| format!("{key} must be an integer millisecond count, got `{raw}`"))?;
            Ok(Some(Duration::from_millis(ms)))
        }
        Err(_) => Ok(None),
    }
}
