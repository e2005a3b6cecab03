use std::collections::VecDeque;

use tracing::info;

use crate::telemetry::Telemetry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Continue,
    /// End the session. The loop stops without sending a further command.
    Quit,
}

/// Invoked once per decision cycle with the decoded reading, display only.
/// Nothing a view returns or stores ever feeds back into the policy.
pub trait ViewHook {
    fn on_cycle(&mut self, telemetry: &Telemetry, tilt: f64) -> ViewAction;
}

/// Headless view for tests and driverless runs.
pub struct NullView;

impl ViewHook for NullView {
    fn on_cycle(&mut self, _telemetry: &Telemetry, _tilt: f64) -> ViewAction {
        ViewAction::Continue
    }
}

/// Log-based readout standing in for a graphical visualizer: one structured
/// line per cycle, plus a bounded altitude history for a min/max trend.
pub struct ConsoleView {
    altitude_history: VecDeque<f64>,
}

impl ConsoleView {
    /// Samples kept for the altitude trend.
    pub const MAX_HISTORY: usize = 100;

    pub fn new() -> Self {
        Self {
            altitude_history: VecDeque::with_capacity(Self::MAX_HISTORY),
        }
    }

    pub fn history_len(&self) -> usize {
        self.altitude_history.len()
    }

    /// (min, max) over the retained altitude samples.
    pub fn altitude_span(&self) -> Option<(f64, f64)> {
        let mut iter = self.altitude_history.iter().copied();
        let first = iter.next()?;
        let span = iter.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(span)
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewHook for ConsoleView {
    fn on_cycle(&mut self, telemetry: &Telemetry, tilt: f64) -> ViewAction {
        self.altitude_history.push_back(telemetry.y);
        if self.altitude_history.len() > Self::MAX_HISTORY {
            self.altitude_history.pop_front();
        }
        let (alt_min, alt_max) = self.altitude_span().unwrap_or((telemetry.y, telemetry.y));

        info!(
            x = telemetry.x,
            y = telemetry.y,
            battery = telemetry.battery,
            sensor = %telemetry.sensor,
            wind = telemetry.wind,
            dust = telemetry.dust,
            tilt,
            alt_min,
            alt_max,
            "flight readout"
        );
        ViewAction::Continue
    }
}
