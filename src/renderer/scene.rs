//! Scene composition: one full picture of the driver's state per call

use glam::Vec2;

use super::surface::{Frame, Surface};
use super::vertex::colors;
use crate::consts::PARTICLE_MAX_RADIUS;
use crate::sim::Driver;

/// Ball outline stroke width
const BALL_OUTLINE_WIDTH: f32 = 2.0;
/// Peak opacity of the newest trail disc
const TRAIL_ALPHA: f32 = 0.5;
/// Halo discs drawn behind the ball when glow is on
const GLOW_LAYERS: u32 = 4;
/// How far the outermost halo disc reaches past the ball edge
const GLOW_SPREAD: f32 = 20.0;
const GLOW_ALPHA: f32 = 0.12;

/// Draw the whole scene, back to front
pub fn draw_scene(surface: &mut dyn Surface, driver: &Driver) {
    let size = surface.size();
    surface.fill_rect(Vec2::ZERO, size, colors::BACKGROUND);

    driver.shape().boundary().draw(surface, driver.arena());

    let state = driver.state();
    let settings = driver.settings();
    let ball = &state.ball;

    if settings.trails {
        // Oldest first so newer discs land on top; index 0 sits under the ball
        let len = ball.trail.len() as f32;
        for (i, point) in ball.trail.iter().enumerate().skip(1).rev() {
            let fade = 1.0 - i as f32 / len;
            surface.fill_arc(
                point.pos,
                ball.radius * (0.5 + 0.5 * fade),
                colors::hue(ball.hue, TRAIL_ALPHA * fade),
            );
        }
    }

    for particle in &state.particles {
        surface.fill_arc(
            particle.pos,
            PARTICLE_MAX_RADIUS * particle.life(),
            colors::hue(particle.hue, particle.life() * 0.8),
        );
    }

    if settings.glow {
        for layer in (1..=GLOW_LAYERS).rev() {
            let reach = GLOW_SPREAD * layer as f32 / GLOW_LAYERS as f32;
            surface.fill_arc(ball.pos, ball.radius + reach, colors::hue(ball.hue, GLOW_ALPHA));
        }
    }

    surface.fill_arc(ball.pos, ball.radius, colors::hue(ball.hue, 1.0));
    surface.stroke_arc(ball.pos, ball.radius, BALL_OUTLINE_WIDTH, colors::BALL_OUTLINE);
}

/// Record the scene into a fresh frame of the given size
pub fn compose(driver: &Driver, size: Vec2) -> Frame {
    let mut frame = Frame::new(size);
    draw_scene(&mut frame, driver);
    frame
}
