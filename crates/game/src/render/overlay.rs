//! Flight HUD: readouts, fuel gauge, pad-alignment arrows and the proximity warning.

use glam::Vec2;
use physics::LanderState;
use procgen::PadGeometry;
use renderer::{measure_text, Canvas, Color, Projector, TextSize};

use crate::warning::WarningDirection;

const FUEL_BAR_ORIGIN: Vec2 = Vec2::new(10.0, 40.0);
const FUEL_BAR_SIZE: Vec2 = Vec2::new(200.0, 20.0);
/// Pad-centre offset from the viewport centre, in pixels, before arrows show.
pub const ALIGNMENT_DEADZONE: f32 = 10.0;
const ARROW_OFFSET: f32 = 50.0;

/// Readouts and gauge in the top-left corner, then the alignment arrows.
pub fn draw_hud(
    canvas: &mut dyn Canvas,
    projector: &Projector,
    lander: &LanderState,
    pad: &PadGeometry,
    max_fuel: f32,
) {
    draw_alignment_arrows(canvas, projector, lander, pad);

    let v = lander.velocity;
    let text = |canvas: &mut dyn Canvas, s: String, y: f32| {
        canvas.draw_text(&s, Vec2::new(10.0, y), Color::WHITE, TextSize::Normal);
    };
    text(canvas, format!("Altitude: {} m", lander.altitude() as i32), 10.0);

    canvas.draw_rect(FUEL_BAR_ORIGIN, FUEL_BAR_SIZE, Color::RED);
    let fill = if max_fuel > 0.0 { (lander.fuel / max_fuel).clamp(0.0, 1.0) } else { 0.0 };
    if fill > 0.0 {
        canvas.draw_rect(FUEL_BAR_ORIGIN, Vec2::new(FUEL_BAR_SIZE.x * fill, FUEL_BAR_SIZE.y), Color::GREEN);
    }

    text(canvas, format!("Fuel: {}", lander.fuel as i32), 65.0);
    text(
        canvas,
        format!("Velocity: X={} Y={} Z={} m/s", v.x as i32, v.y as i32, v.z as i32),
        90.0,
    );
    text(canvas, format!("Speed: {} m/s", lander.speed() as i32), 115.0);
}

/// Which arrows to show for a pad centre at `offset` from the viewport centre.
pub fn alignment_arrows(offset: Vec2) -> Vec<(&'static str, Vec2)> {
    let d = ALIGNMENT_DEADZONE;
    let mut arrows = Vec::new();
    if offset.x < -d {
        arrows.push(("<", Vec2::new(-ARROW_OFFSET, 0.0)));
    }
    if offset.x > d {
        arrows.push((">", Vec2::new(ARROW_OFFSET, 0.0)));
    }
    if offset.y < -d {
        arrows.push(("^", Vec2::new(0.0, -ARROW_OFFSET)));
    }
    if offset.y > d {
        arrows.push(("v", Vec2::new(0.0, ARROW_OFFSET)));
    }
    arrows
}

fn draw_alignment_arrows(
    canvas: &mut dyn Canvas,
    projector: &Projector,
    lander: &LanderState,
    pad: &PadGeometry,
) {
    let Some(target) = projector.project(pad.center(), lander.position) else {
        return;
    };
    let center = projector.center();
    for (glyph, at) in alignment_arrows(target - center) {
        canvas.draw_text(glyph, center + at, Color::RED, TextSize::Normal);
    }
}

/// Red warning text centred on screen.
pub fn draw_warning(canvas: &mut dyn Canvas, direction: WarningDirection) {
    let message = direction.message();
    let (w, h) = measure_text(message, TextSize::Normal);
    let at = canvas.center() - Vec2::new((w / 2) as f32, (h / 2) as f32);
    canvas.draw_text(message, at, Color::RED, TextSize::Normal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use renderer::Framebuffer;

    #[test]
    fn arrows_point_toward_the_pad() {
        assert!(alignment_arrows(Vec2::new(10.0, -10.0)).is_empty());
        let glyphs = |o| alignment_arrows(o).into_iter().map(|(g, _)| g).collect::<Vec<_>>();
        assert_eq!(glyphs(Vec2::new(-11.0, 0.0)), ["<"]);
        assert_eq!(glyphs(Vec2::new(30.0, 40.0)), [">", "v"]);
        assert_eq!(glyphs(Vec2::new(0.0, -25.0)), ["^"]);
    }

    #[test]
    fn fuel_gauge_is_proportional() {
        let projector = Projector::new(400, 300);
        let pad = PadGeometry::default();
        let lander = LanderState::default().with_position(Vec3::new(0.0, 0.0, 1000.0)).with_fuel(600.0);
        let mut fb = Framebuffer::new(400, 300);
        draw_hud(&mut fb, &projector, &lander, &pad, 1200.0);
        assert_eq!(fb.count_color(Color::GREEN), 100 * 20);
        assert_eq!(fb.count_color(Color::RED), 100 * 20);
        assert_eq!(fb.pixel(60, 50), Some(Color::GREEN));
        assert_eq!(fb.pixel(160, 50), Some(Color::RED));
    }

    #[test]
    fn empty_tank_is_all_red() {
        let projector = Projector::new(400, 300);
        let lander = LanderState::default().with_position(Vec3::new(0.0, 0.0, 1000.0));
        let mut fb = Framebuffer::new(400, 300);
        draw_hud(&mut fb, &projector, &lander, &PadGeometry::default(), 1200.0);
        assert_eq!(fb.count_color(Color::GREEN), 0);
        assert_eq!(fb.count_color(Color::RED), 200 * 20);
    }

    #[test]
    fn warning_is_centred() {
        let mut fb = Framebuffer::new(400, 300);
        draw_warning(&mut fb, WarningDirection::Left);
        let (w, h) = measure_text(WarningDirection::Left.message(), TextSize::Normal);
        let left = 200 - w / 2;
        let top = 150 - h / 2;
        let mut red_outside = 0;
        for y in 0..300 {
            for x in 0..400 {
                let inside = x >= left && x < left + w && y >= top && y < top + h;
                if !inside && fb.pixel(x, y) == Some(Color::RED) {
                    red_outside += 1;
                }
            }
        }
        assert!(fb.count_color(Color::RED) > 0);
        assert_eq!(red_outside, 0);
    }
}
