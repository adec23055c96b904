//! Game state types: the phase machine and the per-attempt simulation state.

use physics::{LanderState, LanderTuning};
use rand::Rng;

use crate::scenes::{CrashScene, IntroScene, WinAnimation, WinScreen};
use crate::warning::AlertDebounce;

/// Top-level phase. Exactly one is active per tick.
#[derive(Debug)]
pub enum GamePhase {
    /// Title fade before the first descent.
    Intro(IntroScene),
    /// Piloting the lander.
    Flight,
    /// Crash card; restarts automatically.
    Crashed(CrashScene),
    /// Landing cut-scene.
    WinAnimation(WinAnimation),
    /// Waits for the restart key.
    WinScreen(WinScreen),
}

impl GamePhase {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Intro(_) => "intro",
            GamePhase::Flight => "flight",
            GamePhase::Crashed(_) => "crashed",
            GamePhase::WinAnimation(_) => "win-animation",
            GamePhase::WinScreen(_) => "win-screen",
        }
    }
}

/// Everything one descent attempt mutates. Owned by the game and reset on restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub lander: LanderState,
    /// Thrust sound is playing.
    pub thrusting: bool,
    pub alert: AlertDebounce,
}

impl SimulationState {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, tuning: &LanderTuning) -> Self {
        Self {
            lander: LanderState::spawn(rng, tuning),
            thrusting: false,
            alert: AlertDebounce::default(),
        }
    }

    /// Fresh lander at the top of the descent; alert and thrust flags cleared.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &LanderTuning) {
        *self = Self::new(rng, tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn restart_resets_attempt_state() {
        let tuning = LanderTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = SimulationState::new(&mut rng, &tuning);
        sim.lander.fuel = 3.0;
        sim.lander.position.z = 12.0;
        sim.thrusting = true;
        sim.alert.update(true, 0);

        sim.restart(&mut rng, &tuning);
        assert_eq!(sim.lander.fuel, tuning.max_fuel);
        assert_eq!(sim.lander.position.z, 20000.0);
        assert_eq!(sim.lander.velocity.z, -10.0);
        assert!(sim.lander.position.x.abs() <= 200.0 && sim.lander.position.y.abs() <= 200.0);
        assert!(sim.lander.velocity.x.abs() <= 5.0 && sim.lander.velocity.y.abs() <= 5.0);
        assert!(!sim.thrusting);
        assert!(!sim.alert.is_alerting());
    }
}
