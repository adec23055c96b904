//! Proximity warnings: which way to thrust away from the nearest asteroid,
//! and when to sound the alert.

use glam::Vec3;

/// Nearest-obstacle distance below which the warning shows.
pub const WARNING_THRESHOLD: f32 = 200.0;
/// Minimum time between alert starts, and the longest an alert plays.
pub const ALERT_DEBOUNCE_MS: u64 = 2000;

/// Direction the pilot should thrust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningDirection {
    Left,
    Right,
    Up,
    Down,
}

impl WarningDirection {
    /// Pick the direction from the obstacle's offset relative to the lander.
    ///
    /// The axis with the larger magnitude wins, ties going to y. An obstacle
    /// toward +x means thrust left, toward -x thrust right, toward +y thrust
    /// up, toward -y thrust down.
    pub fn from_offset(offset: Vec3) -> Self {
        if offset.x.abs() > offset.y.abs() {
            if offset.x > 0.0 {
                WarningDirection::Left
            } else {
                WarningDirection::Right
            }
        } else if offset.y > 0.0 {
            WarningDirection::Up
        } else {
            WarningDirection::Down
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            WarningDirection::Left => "Warning: Thrust LEFT!",
            WarningDirection::Right => "Warning: Thrust RIGHT!",
            WarningDirection::Up => "Warning: Thrust UP!",
            WarningDirection::Down => "Warning: Thrust DOWN!",
        }
    }
}

/// What to do with the alert sound this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Start,
    Stop,
    Keep,
}

/// Debounced alert: starts at most once per window while the warning holds,
/// stops when the warning clears or the window runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDebounce {
    window_ms: u64,
    last_start_ms: Option<u64>,
    alerting: bool,
}

impl Default for AlertDebounce {
    fn default() -> Self {
        Self::new(ALERT_DEBOUNCE_MS)
    }
}

impl AlertDebounce {
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms, last_start_ms: None, alerting: false }
    }

    pub fn is_alerting(&self) -> bool {
        self.alerting
    }

    fn window_elapsed(&self, now_ms: u64) -> bool {
        self.last_start_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= self.window_ms)
    }

    /// Advance with this tick's warning condition.
    pub fn update(&mut self, warning: bool, now_ms: u64) -> AlertAction {
        if warning {
            if !self.alerting && self.window_elapsed(now_ms) {
                self.alerting = true;
                self.last_start_ms = Some(now_ms);
                return AlertAction::Start;
            }
        } else if self.alerting {
            self.alerting = false;
            return AlertAction::Stop;
        }

        if self.alerting && self.window_elapsed(now_ms) {
            self.alerting = false;
            return AlertAction::Stop;
        }
        AlertAction::Keep
    }

    /// Forget all history, as on restart.
    pub fn reset(&mut self) {
        *self = Self::new(self.window_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_threat_opposite_on_dominant_axis() {
        let cases = [
            (Vec3::new(150.0, 20.0, 0.0), WarningDirection::Left),
            (Vec3::new(-150.0, 20.0, 0.0), WarningDirection::Right),
            (Vec3::new(10.0, 120.0, 0.0), WarningDirection::Up),
            (Vec3::new(10.0, -120.0, 0.0), WarningDirection::Down),
            // Equal magnitudes fall through to the y axis.
            (Vec3::new(50.0, 50.0, 0.0), WarningDirection::Up),
            (Vec3::new(50.0, -50.0, 0.0), WarningDirection::Down),
            (Vec3::new(0.0, 0.0, 100.0), WarningDirection::Down),
        ];
        for (offset, expected) in cases {
            assert_eq!(WarningDirection::from_offset(offset), expected, "{offset:?}");
        }
    }

    #[test]
    fn continuous_warning_retriggers_once_per_window() {
        let mut alert = AlertDebounce::default();
        let mut starts = Vec::new();
        let mut stops = Vec::new();
        // 5 seconds of continuous warning at ~60 Hz.
        for tick in 0..300u64 {
            let now = tick * 1000 / 60;
            match alert.update(true, now) {
                AlertAction::Start => starts.push(now),
                AlertAction::Stop => stops.push(now),
                AlertAction::Keep => {}
            }
        }
        assert_eq!(starts.len(), 3);
        assert_eq!(starts[0], 0);
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= ALERT_DEBOUNCE_MS);
        }
        assert_eq!(stops.len(), 2);
        assert!(stops[0] >= ALERT_DEBOUNCE_MS && stops[0] < starts[1]);
    }

    #[test]
    fn clearing_stops_and_debounces_next_start() {
        let mut alert = AlertDebounce::default();
        assert_eq!(alert.update(true, 10_000), AlertAction::Start);
        assert_eq!(alert.update(true, 10_500), AlertAction::Keep);
        assert_eq!(alert.update(false, 10_600), AlertAction::Stop);
        assert!(!alert.is_alerting());
        assert_eq!(alert.update(false, 10_700), AlertAction::Keep);
        // Condition returns inside the window: stays quiet.
        assert_eq!(alert.update(true, 11_000), AlertAction::Keep);
        assert_eq!(alert.update(true, 12_000), AlertAction::Start);
    }

    #[test]
    fn reset_allows_immediate_alert() {
        let mut alert = AlertDebounce::default();
        alert.update(true, 0);
        alert.update(false, 100);
        alert.reset();
        assert_eq!(alert.update(true, 200), AlertAction::Start);
    }
}
