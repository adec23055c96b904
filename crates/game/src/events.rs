//! Window event handling for GameState: input, resizes, and the per-frame
//! tick/present/wait cycle driven by redraw requests.

use renderer::PresentError;
use winit::event::WindowEvent;

impl crate::GameState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.input.request_quit();
                true
            }
            WindowEvent::Resized(size) => {
                self.presenter.resize(size.width, size.height);
                self.framebuffer.resize(size.width, size.height);
                log::debug!("Resized to {}x{}", size.width, size.height);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                }
                false
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
                false
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => false,
        }
    }

    /// Tick, present, and wait out the rest of the tick budget.
    fn frame(&mut self) -> bool {
        let now_ms = self.time.now_ms();
        self.game.tick(&mut self.framebuffer, self.sound.as_mut(), &mut self.input, now_ms);
        if self.game.should_quit() {
            return true;
        }

        match self.presenter.present(&self.framebuffer) {
            Ok(()) => {}
            Err(PresentError::Lost) => {
                let (w, h) = self.presenter.size();
                log::warn!("Surface lost, reconfiguring");
                self.presenter.resize(w, h);
            }
            Err(PresentError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                return true;
            }
            Err(e) => log::warn!("Dropped frame: {e}"),
        }

        self.time.wait_for_tick();
        if self.time.tick_count() % 600 == 0 {
            log::debug!("{} ticks, {:.1} fps, phase {}", self.time.tick_count(), self.time.fps(), self.game.phase.name());
        }
        self.window.request_redraw();
        false
    }
}
