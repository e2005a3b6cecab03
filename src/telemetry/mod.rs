pub mod decode;

pub use decode::{decode, DecodeError};

/// One decoded telemetry reading. Immutable, one instance per cycle;
/// nothing in the core retains it past the cycle that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    /// Horizontal position.
    pub x: f64,
    /// Altitude. May go negative only as a transient/invalid signal.
    pub y: f64,
    /// Battery percentage, nominally 0..=100. The decoder does not clamp;
    /// out-of-range values are the policy's problem.
    pub battery: f64,
    /// Angular-rate vector. Consumed only through `tilt()`.
    pub gyroscope: (f64, f64, f64),
    pub wind: f64,
    pub dust: f64,
    /// Raw uppercase sensor token, kept verbatim. Map through `color()`
    /// before matching rules against it.
    pub sensor: String,
}

/// Hazard classification as the policy sees it. Tokens the decoder accepted
/// but the policy doesn't know fall into `Unknown` and match no
/// sensor-specific rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorColor {
    Green,
    Yellow,
    Red,
    Unknown,
}

impl Telemetry {
    /// Euclidean norm of the gyroscope vector.
    pub fn tilt(&self) -> f64 {
        let (gx, gy, gz) = self.gyroscope;
        (gx * gx + gy * gy + gz * gz).sqrt()
    }

    pub fn color(&self) -> SensorColor {
        match self.sensor.as_str() {
            "GREEN" => SensorColor::Green,
            "YELLOW" => SensorColor::Yellow,
            "RED" => SensorColor::Red,
            _ => SensorColor::Unknown,
        }
    }
}
