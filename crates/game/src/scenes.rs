//! Full-screen scenes shown outside of flight: the intro fade, the crash
//! card, the astronaut walking out after a landing, and the win screen.
//!
//! Each scene owns its own progress and knows how to draw itself; the
//! orchestrator only advances it once per tick and reads whether it is done.

use engine_core::ticks_for_ms;
use glam::Vec2;
use rand::Rng;
use renderer::{Canvas, Color, RgbaImage, TextSize};

/// Intro length with an image: fade in then fade out.
pub const INTRO_FRAMES: u32 = 180;
const INTRO_FADE_FRAMES: u32 = 90;
/// How long the crash card stays up.
pub const CRASH_HOLD_MS: u64 = 2000;
/// Animation frames in the landing scene.
pub const WIN_ANIMATION_FRAMES: u32 = 120;
/// The landing scene runs at 30 fps on the 60 Hz tick.
pub const TICKS_PER_ANIMATION_FRAME: u32 = 2;
const HATCH_OPEN_FRAMES: u32 = 60;
pub const ORB_COUNT: usize = 50;

const LANDER_GREY: Color = Color::grey(150);
const HATCH_GREY: Color = Color::grey(100);
const SUIT_WHITE: Color = Color::grey(200);

/// Fading title image. Without an image it is a short black pause.
#[derive(Debug, Default)]
pub struct IntroScene {
    frame: u32,
    /// Intro image stretched to the viewport, built on first draw.
    scaled: Option<RgbaImage>,
}

impl IntroScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks the intro runs for.
    pub fn duration(has_image: bool) -> u32 {
        if has_image {
            INTRO_FRAMES
        } else {
            ticks_for_ms(1000)
        }
    }

    /// Opacity of the intro image at `frame`.
    pub fn alpha(frame: u32) -> f32 {
        if frame < INTRO_FADE_FRAMES {
            frame as f32 / INTRO_FADE_FRAMES as f32
        } else {
            INTRO_FRAMES.saturating_sub(frame) as f32 / INTRO_FADE_FRAMES as f32
        }
    }

    /// Step one tick. Returns true once the intro is over.
    pub fn advance(&mut self, has_image: bool) -> bool {
        self.frame += 1;
        self.frame >= Self::duration(has_image)
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, image: Option<&RgbaImage>) {
        canvas.fill(Color::BLACK);
        let Some(image) = image else {
            return;
        };
        let (w, h) = canvas.size();
        if self.scaled.as_ref().map(|s| s.dimensions()) != Some((w, h)) {
            self.scaled = Some(renderer::stretch(image, w, h));
        }
        if let Some(scaled) = &self.scaled {
            canvas.draw_image_faded(scaled, Vec2::ZERO, Self::alpha(self.frame));
        }
    }
}

/// Red crash card, then an automatic restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrashScene {
    ticks_left: u32,
}

impl Default for CrashScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CrashScene {
    pub fn new() -> Self {
        Self { ticks_left: ticks_for_ms(CRASH_HOLD_MS) }
    }

    pub fn ticks_left(&self) -> u32 {
        self.ticks_left
    }

    /// Step one tick. Returns true once the card has been shown long enough.
    pub fn advance(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left == 0
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill(Color::RED);
        let pos = Vec2::new(canvas.width() / 2.0 - 200.0, canvas.height() / 2.0);
        canvas.draw_text("Crash! Restarting...", pos, Color::BLACK, TextSize::Large);
    }
}

/// Lander on the surface, hatch swinging open, astronaut walking out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinAnimation {
    tick: u32,
}

impl WinAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current animation frame (30 fps).
    pub fn frame(&self) -> u32 {
        self.tick / TICKS_PER_ANIMATION_FRAME
    }

    /// Step one tick. Returns true after the last frame.
    pub fn advance(&mut self) -> bool {
        self.tick += 1;
        self.frame() >= WIN_ANIMATION_FRAMES
    }

    /// Hatch angle in degrees: 90 (closed, vertical) to 0 (open, flat).
    pub fn hatch_angle(frame: u32) -> f32 {
        if frame < HATCH_OPEN_FRAMES {
            90.0 - frame as f32 / HATCH_OPEN_FRAMES as f32 * 90.0
        } else {
            0.0
        }
    }

    /// Astronaut x relative to its start, `None` before it appears.
    pub fn astronaut_offset(frame: u32) -> Option<f32> {
        (frame > HATCH_OPEN_FRAMES).then(|| (frame - HATCH_OPEN_FRAMES) as f32)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let frame = self.frame();
        let (w, h) = (canvas.width(), canvas.height());
        canvas.fill(Color::MARS_DUST);

        canvas.draw_rect(Vec2::new(w / 2.0 - 50.0, h - 200.0), Vec2::new(100.0, 150.0), LANDER_GREY);

        let pivot = Vec2::new(w / 2.0 + 50.0, h - 100.0);
        let angle = Self::hatch_angle(frame).to_radians();
        let door_end = pivot + Vec2::new(angle.cos(), angle.sin()) * 40.0;
        canvas.draw_line(pivot, door_end, HATCH_GREY, 5);

        let Some(offset) = Self::astronaut_offset(frame) else {
            return;
        };
        let move_frame = (frame - HATCH_OPEN_FRAMES) as f32;
        let x = w / 2.0 + 30.0 + offset;
        let y = h - 100.0;

        // Helmet with a black visor in the top half.
        canvas.draw_circle(Vec2::new(x, y - 30.0), 15.0, SUIT_WHITE, 0);
        let visor_center = Vec2::new(x, y - 28.0);
        let visor: Vec<Vec2> = std::iter::once(visor_center)
            .chain((180..=360).step_by(10).map(|deg| {
                let a = (deg as f32).to_radians();
                visor_center + Vec2::new(a.cos(), a.sin()) * 10.0
            }))
            .collect();
        canvas.draw_polygon(&visor, Color::BLACK, true);

        canvas.draw_rect(Vec2::new(x - 15.0, y - 15.0), Vec2::new(30.0, 40.0), SUIT_WHITE);

        let arm_y = y - 5.0;
        canvas.draw_rect(Vec2::new(x - 25.0, arm_y - 5.0), Vec2::new(10.0, 20.0), SUIT_WHITE);
        canvas.draw_rect(Vec2::new(x + 15.0, arm_y - 5.0), Vec2::new(10.0, 20.0), SUIT_WHITE);

        let stride = (move_frame * 0.5).sin() * 5.0;
        canvas.draw_rect(Vec2::new(x - 10.0, y + 25.0), Vec2::new(8.0, 20.0 + stride), SUIT_WHITE);
        canvas.draw_rect(Vec2::new(x + 2.0, y + 25.0), Vec2::new(8.0, 20.0 - stride), SUIT_WHITE);
    }
}

/// A bouncing decoration on the win screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub radius: f32,
}

impl Orb {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(
                rng.gen_range(0..=width as u32) as f32,
                rng.gen_range(0..=height as u32) as f32,
            ),
            velocity: Vec2::new(rng.gen_range(-2.0..=2.0), rng.gen_range(-2.0..=2.0)),
            color: Color::rgb(rng.gen_range(100..=255), rng.gen_range(100..=255), rng.gen_range(100..=255)),
            radius: rng.gen_range(5..=15) as f32,
        }
    }

    /// Move one step and reverse velocity on any axis that left the screen.
    pub fn step(&mut self, width: f32, height: f32) {
        self.position += self.velocity;
        if self.position.x < self.radius || self.position.x > width - self.radius {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < self.radius || self.position.y > height - self.radius {
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Green "You Landed!" screen that waits for the restart key.
#[derive(Debug, Clone, PartialEq)]
pub struct WinScreen {
    pub orbs: Vec<Orb>,
}

impl WinScreen {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self { orbs: (0..ORB_COUNT).map(|_| Orb::random(rng, width, height)).collect() }
    }

    pub fn advance(&mut self, width: f32, height: f32) {
        for orb in &mut self.orbs {
            orb.step(width, height);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let (w, h) = (canvas.width(), canvas.height());
        canvas.fill(Color::GREEN);
        canvas.draw_text("You Landed!", Vec2::new(w / 2.0 - 150.0, h / 2.0 - 50.0), Color::BLACK, TextSize::Large);
        canvas.draw_text(
            "Press R to restart from the top",
            Vec2::new(w / 2.0 - 150.0, h / 2.0 + 10.0),
            Color::BLACK,
            TextSize::Normal,
        );
        for orb in &self.orbs {
            canvas.draw_circle(orb.position, orb.radius, orb.color, 0);
        }
    }
}
