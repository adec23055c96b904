//! The descent orchestrator: owns the world and the current attempt, and
//! moves between phases. The per-tick logic is in `update.rs`.

use std::fmt::Display;

use audio::{Cue, SoundBoard};
use physics::{Integrator, LanderTuning, LandingCriteria};
use procgen::{AsteroidField, FieldConfig, PadGeometry};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{Canvas, Projector};

use crate::config::GameConfig;
use crate::render::Visuals;
use crate::scenes::{CrashScene, IntroScene, WinAnimation};
use crate::state::{GamePhase, SimulationState};

pub struct Game {
    pub phase: GamePhase,
    pub sim: SimulationState,
    /// Generated once; survives every restart.
    pub field: AsteroidField,
    pub pad: PadGeometry,
    pub(crate) integrator: Integrator,
    pub(crate) criteria: LandingCriteria,
    pub projector: Projector,
    pub visuals: Visuals,
    /// Drives restarts and win-screen orbs. Separate from the field seed.
    pub(crate) rng: StdRng,
    quit: bool,
}

impl Game {
    /// A game over `field`, starting in the intro or directly in flight.
    /// Nothing plays until [`Game::start`].
    pub fn new(field: AsteroidField, visuals: Visuals, mut rng: StdRng, show_intro: bool) -> Self {
        let tuning = LanderTuning::default();
        let pad = PadGeometry::default();
        let phase = if show_intro { GamePhase::Intro(IntroScene::new()) } else { GamePhase::Flight };
        Self {
            phase,
            sim: SimulationState::new(&mut rng, &tuning),
            field,
            criteria: LandingCriteria::for_pad(pad.half_extent()),
            pad,
            integrator: Integrator::new(tuning),
            projector: Projector::new(1, 1),
            visuals,
            rng,
            quit: false,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let seed = config.obstacle_seed.unwrap_or_else(rand::random);
        let field_config = FieldConfig { count: config.obstacle_count, ..Default::default() };
        let field = AsteroidField::generate(seed, &field_config);
        let visuals = Visuals::load(&config.asset_dir, seed);
        Self::new(field, visuals, StdRng::from_entropy(), config.show_intro)
    }

    /// Put the lander at the top of its first descent and start the music.
    /// Keeps the intro if there is one.
    pub fn start(&mut self, sound: &mut dyn SoundBoard) {
        let intro = std::mem::replace(&mut self.phase, GamePhase::Flight);
        self.restart(sound);
        if let GamePhase::Intro(_) = intro {
            self.phase = intro;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit = true;
    }

    /// New attempt from the top. The field and pad stay as they are.
    pub(crate) fn restart(&mut self, sound: &mut dyn SoundBoard) {
        let tuning = *self.integrator.tuning();
        self.sim.restart(&mut self.rng, &tuning);
        if let Some(backdrop) = self.visuals.backdrop.as_mut() {
            backdrop.invalidate();
        }
        sound.stop(Cue::Thrust);
        sound.stop(Cue::Alert);
        sound.play(Cue::Music, true);
        self.phase = GamePhase::Flight;
        log::info!(
            "Descent started at ({:.0}, {:.0}, {:.0})",
            self.sim.lander.position.x,
            self.sim.lander.position.y,
            self.sim.lander.position.z
        );
    }

    fn silence_flight(&mut self, sound: &mut dyn SoundBoard) {
        sound.stop(Cue::Music);
        sound.stop(Cue::Thrust);
        sound.stop(Cue::Alert);
        self.sim.thrusting = false;
        self.sim.alert.reset();
    }

    /// Switch to the crash card and show it right away.
    pub(crate) fn crash(&mut self, canvas: &mut dyn Canvas, sound: &mut dyn SoundBoard, cause: impl Display) {
        self.silence_flight(sound);
        sound.play(Cue::Lose, false);
        log::info!("Crashed: {cause}");
        let scene = CrashScene::new();
        scene.draw(canvas);
        self.phase = GamePhase::Crashed(scene);
    }

    pub(crate) fn land(&mut self, sound: &mut dyn SoundBoard) {
        self.silence_flight(sound);
        sound.play(Cue::Win, false);
        let v = self.sim.lander.velocity;
        log::info!(
            "Landed at ({:.1}, {:.1}) with velocity ({:.2}, {:.2}, {:.2})",
            self.sim.lander.position.x,
            self.sim.lander.position.y,
            v.x,
            v.y,
            v.z
        );
        self.phase = GamePhase::WinAnimation(WinAnimation::new());
    }
}
