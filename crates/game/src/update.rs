//! One tick of the game: drain input, then run the active phase.
//!
//! A flight tick draws the world from the state at the start of the tick,
//! checks obstacles, updates the warning, integrates, and finally checks for
//! touchdown. A collision ends the tick early.

use audio::{Cue, SoundBoard};
use engine_core::Obstacle;
use input::{InputEvent, InputState, KeyCode, RESTART_KEY};
use physics::{scan_obstacles, ScanResult, ThrustInput, Touchdown, ROVER_RADIUS};
use renderer::Canvas;

use crate::game::Game;
use crate::render::{self, overlay};
use crate::scenes::WinScreen;
use crate::state::GamePhase;
use crate::warning::{AlertAction, WarningDirection, WARNING_THRESHOLD};

/// Map held keys to thrusters.
pub fn thrust_input(input: &InputState) -> ThrustInput {
    ThrustInput {
        left: input.is_thrust_left_held(),
        right: input.is_thrust_right_held(),
        forward: input.is_thrust_forward_held(),
        back: input.is_thrust_back_held(),
        vertical: input.is_main_engine_held(),
    }
}

impl Game {
    /// Advance one tick and draw it into `canvas`. `now_ms` is a monotonic clock.
    pub fn tick(
        &mut self,
        canvas: &mut dyn Canvas,
        sound: &mut dyn SoundBoard,
        input: &mut InputState,
        now_ms: u64,
    ) {
        let (w, h) = canvas.size();
        self.projector.resize(w, h);

        // Keys queued behind a quit are dropped.
        for event in input.drain_events() {
            if self.should_quit() {
                break;
            }
            match event {
                InputEvent::Quit => self.request_quit(),
                InputEvent::KeyDown(key) => self.on_key_down(key, sound),
            }
        }

        if !self.should_quit() {
            self.run_phase(canvas, sound, input, now_ms);
        }
    }

    fn on_key_down(&mut self, key: KeyCode, sound: &mut dyn SoundBoard) {
        match self.phase {
            GamePhase::Intro(_) => {
                log::debug!("Intro skipped");
                self.phase = GamePhase::Flight;
            }
            GamePhase::WinScreen(_) if key == RESTART_KEY => self.restart(sound),
            _ => {}
        }
    }

    fn run_phase(
        &mut self,
        canvas: &mut dyn Canvas,
        sound: &mut dyn SoundBoard,
        input: &InputState,
        now_ms: u64,
    ) {
        match self.phase {
            GamePhase::Intro(ref mut intro) => {
                let has_image = self.visuals.intro.is_some();
                intro.draw(canvas, self.visuals.intro.as_ref());
                if intro.advance(has_image) {
                    self.phase = GamePhase::Flight;
                }
            }
            GamePhase::Flight => self.flight(canvas, sound, input, now_ms),
            GamePhase::Crashed(ref mut scene) => {
                scene.draw(canvas);
                if scene.advance() {
                    self.restart(sound);
                }
            }
            GamePhase::WinAnimation(ref mut animation) => {
                animation.draw(canvas);
                if animation.advance() {
                    let screen = WinScreen::new(&mut self.rng, canvas.width(), canvas.height());
                    self.phase = GamePhase::WinScreen(screen);
                }
            }
            GamePhase::WinScreen(ref mut screen) => {
                screen.advance(canvas.width(), canvas.height());
                screen.draw(canvas);
            }
        }
    }

    fn flight(
        &mut self,
        canvas: &mut dyn Canvas,
        sound: &mut dyn SoundBoard,
        input: &InputState,
        now_ms: u64,
    ) {
        let lander = self.sim.lander;
        let max_fuel = self.integrator.tuning().max_fuel;
        render::draw_world(canvas, &self.projector, &lander, &self.field, &self.pad, &mut self.visuals);
        overlay::draw_hud(canvas, &self.projector, &lander, &self.pad, max_fuel);

        let scan = {
            let mut query = self.field.world().query::<&Obstacle>();
            scan_obstacles(lander.position, query.iter().map(|(_, o)| o), ROVER_RADIUS)
        };
        let nearest = match scan {
            ScanResult::Collision { obstacle, distance } => {
                let cause = format!(
                    "hit asteroid at ({:.0}, {:.0}, {:.0}), distance {distance:.1}",
                    obstacle.position.x, obstacle.position.y, obstacle.position.z
                );
                self.crash(canvas, sound, cause);
                return;
            }
            ScanResult::Clear { nearest } => nearest,
        };

        let threat = nearest.filter(|n| n.distance < WARNING_THRESHOLD);
        if let Some(n) = threat {
            let direction = WarningDirection::from_offset(n.offset_from(lander.position));
            overlay::draw_warning(canvas, direction);
        }
        match self.sim.alert.update(threat.is_some(), now_ms) {
            AlertAction::Start => sound.play(Cue::Alert, false),
            AlertAction::Stop => sound.stop(Cue::Alert),
            AlertAction::Keep => {}
        }

        let report = self.integrator.step(&mut self.sim.lander, thrust_input(input));
        if report.thrusting != self.sim.thrusting {
            if report.thrusting {
                sound.play(Cue::Thrust, true);
            } else {
                sound.stop(Cue::Thrust);
            }
            self.sim.thrusting = report.thrusting;
        }

        match self.criteria.evaluate(&self.sim.lander) {
            Some(Touchdown::Landed) => self.land(sound),
            Some(Touchdown::Crashed(fault)) => self.crash(canvas, sound, fault),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio::Recorder;
    use glam::Vec3;
    use input::ElementState;
    use physics::LanderState;
    use procgen::AsteroidField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use renderer::{Color, Framebuffer};

    use crate::render::Visuals;
    use crate::scenes::{CrashScene, WinAnimation, WIN_ANIMATION_FRAMES};

    const W: u32 = 320;
    const H: u32 = 240;

    fn far_rock() -> Obstacle {
        Obstacle::new(Vec3::new(3500.0, 3500.0, 9000.0), 100.0)
    }

    fn game_with(obstacles: Vec<Obstacle>, show_intro: bool) -> Game {
        let field = AsteroidField::from_obstacles(obstacles);
        Game::new(field, Visuals::default(), StdRng::seed_from_u64(11), show_intro)
    }

    fn obstacles(game: &Game) -> Vec<Obstacle> {
        game.field.world().query::<&Obstacle>().iter().map(|(_, o)| *o).collect()
    }

    struct Harness {
        fb: Framebuffer,
        sound: Recorder,
        input: InputState,
        now_ms: u64,
    }

    impl Harness {
        fn new() -> Self {
            Self { fb: Framebuffer::new(W, H), sound: Recorder::new(), input: InputState::new(), now_ms: 0 }
        }

        fn tick(&mut self, game: &mut Game) {
            game.tick(&mut self.fb, &mut self.sound, &mut self.input, self.now_ms);
            self.now_ms += 16;
        }

        fn press(&mut self, key: KeyCode) {
            self.input.process_keyboard(key, ElementState::Pressed);
        }
    }

    #[test]
    fn collision_crashes_before_physics() {
        let rock = Obstacle::new(Vec3::new(0.0, 0.0, 5000.0), 100.0);
        let mut game = game_with(vec![far_rock(), rock], false);
        game.sim.lander = LanderState::default()
            .with_position(Vec3::new(0.0, 50.0, 5000.0))
            .with_fuel(500.0);
        let mut h = Harness::new();
        h.press(KeyCode::Space);
        h.tick(&mut game);

        assert!(matches!(game.phase, GamePhase::Crashed(_)));
        // The engine never fired: no fuel burnt and no thrust sound.
        assert_eq!(game.sim.lander.fuel, 500.0);
        assert_eq!(h.sound.play_count(Cue::Thrust), 0);
        assert_eq!(h.sound.play_count(Cue::Lose), 1);
        assert_eq!(h.fb.pixel(2, H - 2), Some(Color::RED));
    }

    #[test]
    fn gentle_touchdown_on_pad_lands() {
        let mut game = game_with(vec![far_rock()], false);
        let mut h = Harness::new();
        game.start(&mut h.sound);
        assert!(h.sound.is_playing(Cue::Music));

        game.sim.lander = LanderState::default()
            .with_position(Vec3::new(3.0, -4.0, 0.1))
            .with_velocity(Vec3::new(0.5, -0.5, -1.5))
            .with_fuel(100.0);
        h.tick(&mut game);

        assert!(matches!(game.phase, GamePhase::WinAnimation(_)));
        assert_eq!(h.sound.play_count(Cue::Win), 1);
        assert!(!h.sound.is_playing(Cue::Music));
    }

    #[test]
    fn hard_touchdown_crashes_with_fault() {
        let mut game = game_with(vec![far_rock()], false);
        game.sim.lander = LanderState::default()
            .with_position(Vec3::new(0.0, 0.0, 0.5))
            .with_velocity(Vec3::new(0.0, 0.0, -8.0));
        let mut h = Harness::new();
        h.tick(&mut game);
        assert!(matches!(game.phase, GamePhase::Crashed(_)));
        assert_eq!(h.sound.play_count(Cue::Lose), 1);
        assert_eq!(h.sound.play_count(Cue::Win), 0);
    }

    #[test]
    fn crash_restarts_with_same_field() {
        let mut game = game_with(vec![far_rock(), Obstacle::new(Vec3::new(-3000.0, 2000.0, 15000.0), 150.0)], false);
        let before = obstacles(&game);
        let pad = game.pad.clone();
        game.sim.lander = LanderState::default()
            .with_position(Vec3::new(0.0, 0.0, 0.05))
            .with_velocity(Vec3::new(4.0, 0.0, -1.0))
            .with_fuel(0.0);
        let mut h = Harness::new();
        h.tick(&mut game);
        assert!(matches!(game.phase, GamePhase::Crashed(_)));

        for _ in 0..200 {
            h.tick(&mut game);
            if matches!(game.phase, GamePhase::Flight) {
                break;
            }
        }
        assert!(matches!(game.phase, GamePhase::Flight));
        assert_eq!(obstacles(&game), before);
        assert_eq!(game.pad, pad);
        assert_eq!(game.criteria.pad_half_extent, pad.half_extent());
        assert_eq!(game.sim.lander.fuel, game.integrator.tuning().max_fuel);
        assert_eq!(game.sim.lander.position.z, 20000.0);
        assert!(h.sound.is_playing(Cue::Music));
    }

    #[test]
    fn quit_event_stops_the_game() {
        let mut game = game_with(vec![far_rock()], false);
        let mut h = Harness::new();
        h.input.request_quit();
        let before = game.sim.lander;
        h.tick(&mut game);
        assert!(game.should_quit());
        assert_eq!(game.sim.lander, before);
    }

    #[test]
    fn quit_during_crash_card_never_restarts() {
        let mut game = game_with(vec![far_rock()], false);
        game.phase = GamePhase::Crashed(CrashScene::new());
        let mut h = Harness::new();
        h.input.request_quit();
        for _ in 0..200 {
            h.tick(&mut game);
        }
        assert!(matches!(game.phase, GamePhase::Crashed(_)));
        assert_eq!(h.sound.play_count(Cue::Music), 0);
    }

    #[test]
    fn quit_during_win_animation_holds_the_frame() {
        let mut game = game_with(vec![far_rock()], false);
        game.phase = GamePhase::WinAnimation(WinAnimation::new());
        let mut h = Harness::new();
        for _ in 0..6 {
            h.tick(&mut game);
        }
        let GamePhase::WinAnimation(before) = game.phase else {
            panic!("animation ended early");
        };

        h.input.request_quit();
        for _ in 0..WIN_ANIMATION_FRAMES * 2 {
            h.tick(&mut game);
        }
        assert!(matches!(game.phase, GamePhase::WinAnimation(a) if a == before));
    }

    #[test]
    fn quit_on_win_screen_ignores_restart_key() {
        let mut game = game_with(vec![far_rock()], false);
        let screen = WinScreen::new(&mut StdRng::seed_from_u64(4), W as f32, H as f32);
        game.phase = GamePhase::WinScreen(screen.clone());
        let mut h = Harness::new();
        h.input.request_quit();
        h.press(RESTART_KEY);
        h.tick(&mut game);
        h.tick(&mut game);

        assert!(game.should_quit());
        assert!(matches!(&game.phase, GamePhase::WinScreen(s) if *s == screen));
        assert_eq!(h.sound.play_count(Cue::Music), 0);
    }

    #[test]
    fn frame_shows_the_lander_before_its_step() {
        let mut game = game_with(vec![far_rock()], false);
        game.sim.lander = LanderState::default()
            .with_position(Vec3::new(0.0, 0.0, 100.0))
            .with_velocity(Vec3::new(300.0, 0.0, 0.0))
            .with_fuel(0.0);
        let mut h = Harness::new();
        let mut fb = Framebuffer::new(800, 600);
        game.tick(&mut fb, &mut h.sound, &mut h.input, 0);

        // The step moved the lander 30 units, which would put the pad centre
        // 120 px left of the viewport centre.
        assert!(matches!(game.phase, GamePhase::Flight));
        assert!(game.sim.lander.position.x > 29.0);
        assert_eq!(fb.pixel(400, 300), Some(Color::RED));
        assert_ne!(fb.pixel(280, 300), Some(Color::RED));
    }

    #[test]
    fn any_key_skips_intro() {
        let mut game = game_with(vec![far_rock()], true);
        let mut h = Harness::new();
        game.start(&mut h.sound);
        assert!(matches!(game.phase, GamePhase::Intro(_)));
        assert!(h.sound.is_playing(Cue::Music));

        h.tick(&mut game);
        assert!(matches!(game.phase, GamePhase::Intro(_)));
        h.press(KeyCode::KeyX);
        h.tick(&mut game);
        assert!(matches!(game.phase, GamePhase::Flight));
    }

    #[test]
    fn intro_without_image_ends_on_its_own() {
        let mut game = game_with(vec![far_rock()], true);
        let mut h = Harness::new();
        for _ in 0..crate::scenes::IntroScene::duration(false) {
            assert!(matches!(game.phase, GamePhase::Intro(_)));
            h.tick(&mut game);
        }
        assert!(matches!(game.phase, GamePhase::Flight));
    }

    #[test]
    fn win_sequence_waits_for_restart_key() {
        let mut game = game_with(vec![far_rock()], false);
        let mut h = Harness::new();
        game.phase = GamePhase::WinAnimation(crate::scenes::WinAnimation::new());
        for _ in 0..WIN_ANIMATION_FRAMES * 2 {
            h.tick(&mut game);
        }
        assert!(matches!(game.phase, GamePhase::WinScreen(_)));

        h.press(KeyCode::Space);
        h.tick(&mut game);
        assert!(matches!(game.phase, GamePhase::WinScreen(_)));

        h.press(RESTART_KEY);
        h.tick(&mut game);
        assert!(matches!(game.phase, GamePhase::Flight));
        assert!(h.sound.is_playing(Cue::Music));
        assert_eq!(game.sim.lander.fuel, game.integrator.tuning().max_fuel);
    }

    #[test]
    fn alert_sounds_once_while_threat_persists() {
        let rock = Obstacle::new(Vec3::new(150.0, 0.0, 5000.0), 100.0);
        let mut game = game_with(vec![rock], false);
        game.sim.lander = LanderState::default().with_position(Vec3::new(0.0, 0.0, 5000.0)).with_fuel(0.0);
        let mut h = Harness::new();
        for _ in 0..100 {
            h.tick(&mut game);
            assert!(matches!(game.phase, GamePhase::Flight));
        }
        assert_eq!(h.sound.play_count(Cue::Alert), 1);
        assert!(h.sound.is_playing(Cue::Alert));
        assert!(h.fb.count_color(Color::RED) > 0);
    }

    #[test]
    fn thrust_sound_follows_engine() {
        let mut game = game_with(vec![far_rock()], false);
        game.sim.lander = LanderState::default().with_position(Vec3::new(0.0, 0.0, 15000.0)).with_fuel(10.0);
        let mut h = Harness::new();

        h.press(KeyCode::ArrowLeft);
        h.tick(&mut game);
        assert!(h.sound.is_playing(Cue::Thrust));
        assert_eq!(game.sim.lander.fuel, 9.0);
        assert!(game.sim.lander.velocity.x < 0.0);

        h.tick(&mut game);
        assert_eq!(h.sound.play_count(Cue::Thrust), 1);

        h.input.process_keyboard(KeyCode::ArrowLeft, ElementState::Released);
        h.tick(&mut game);
        assert!(!h.sound.is_playing(Cue::Thrust));
    }

    #[test]
    fn thrust_input_maps_arrows_and_space() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ArrowRight, ElementState::Pressed);
        input.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed);
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        let t = thrust_input(&input);
        assert!(t.right && t.forward && t.vertical);
        assert!(!t.left && !t.back);
    }
}
