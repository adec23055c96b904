//! Mars 3D Rover Landing
//!
//! Pilot a lander from 20 km down to a marked pad through an asteroid field.

mod config;
mod events;
mod game;
mod render;
mod scenes;
mod state;
mod update;
mod warning;

use anyhow::Result;
use audio::SoundBoard;
use engine_core::Time;
use input::InputState;
use renderer::{Framebuffer, Presenter};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use config::GameConfig;
use game::Game;

/// Everything that lives for the lifetime of the window.
pub struct GameState {
    pub game: Game,
    pub presenter: Presenter,
    pub framebuffer: Framebuffer,
    pub input: InputState,
    pub sound: Box<dyn SoundBoard>,
    pub time: Time,
    pub window: Arc<Window>,
}

impl GameState {
    async fn new(window: Arc<Window>, config: GameConfig) -> Result<Self> {
        let presenter = Presenter::new(window.clone()).await?;
        let (width, height) = presenter.size();

        let mut sound = audio::open_sound_board(&config.asset_dir, &config.volumes.into(), config.master_volume);
        let mut game = Game::from_config(&config);
        game.start(sound.as_mut());

        Ok(Self {
            game,
            presenter,
            framebuffer: Framebuffer::new(width, height),
            input: InputState::new(),
            sound,
            time: Time::new(),
            window,
        })
    }
}

struct App {
    state: Option<GameState>,
    /// Why start-up failed, returned from `main` once the loop exits.
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new() -> Self {
        Self { state: None, init_error: None }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.init_error = Some(error);
        event_loop.exit();
    }

    /// `Ok` only when the loop ended without a start-up failure.
    fn finish(self) -> Result<()> {
        match self.init_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() && self.init_error.is_none() {
            let config = GameConfig::load();
            log::info!("Config: {:?}", config);
            let window_attrs = Window::default_attributes()
                .with_title("Mars 3D Rover Landing")
                .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    self.fail(event_loop, anyhow::anyhow!("Failed to create window: {e}"));
                    return;
                }
            };

            let state = pollster::block_on(GameState::new(window.clone(), config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => self.fail(event_loop, e.context("Failed to initialize game")),
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) {
                state.sound.stop_all();
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                      Mars 3D Rover Landing                       ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                                       ║");
    println!("║    Left/Right - Lateral thrust │  Up/Down    - Forward/back      ║");
    println!("║    Space      - Main engine    │  R          - Restart (on win)  ║");
    println!("║    Any key    - Skip intro                                       ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  LAND:  on the pad, |vx| and |vy| under 2, |vz| under 5          ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    log::info!("Starting Mars 3D Rover Landing");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    app.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_exit_is_ok() {
        assert!(App::new().finish().is_ok());
    }

    #[test]
    fn start_up_failure_is_returned() {
        let mut app = App::new();
        app.init_error = Some(anyhow::anyhow!("no adapter"));
        let err = app.finish().unwrap_err();
        assert_eq!(err.to_string(), "no adapter");
    }
}
