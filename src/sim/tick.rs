//! Fixed per-frame simulation tick
//!
//! One call advances the ball by its velocity (no delta time: frame rate
//! sets the effective speed), resolves a boundary hit, and ages particles.

use super::particles;
use super::shape::{Arena, ShapeKind};
use super::state::{SimEvent, SimState, tempo_bpm};
use crate::settings::Settings;

/// Advance the simulation by one frame. Returns true when the ball bounced.
pub fn tick(state: &mut SimState, shape: ShapeKind, arena: &Arena, settings: &Settings) -> bool {
    let ball = &mut state.ball;
    ball.pos += ball.vel;
    ball.record_trail();

    let boundary = shape.boundary();
    let bounced = boundary.check_collision(ball, arena);
    if bounced {
        boundary.reflect(ball, arena);
        ball.advance_hue();
        ball.vel *= settings.bounce_multiplier();

        let speed = ball.speed();
        let stats = &mut state.stats;
        stats.bounce_count += 1;
        stats.speed = speed;
        stats.tempo_bpm = tempo_bpm(speed);

        let (point, hue) = (ball.pos, ball.hue);
        state.events.push(SimEvent::Bounce { point, hue, speed });
        if settings.particles {
            state.burst_at(point, hue);
        }

        log::debug!(
            "Bounce #{} on {}: speed {:.2}, hue {}",
            state.stats.bounce_count,
            shape.as_str(),
            speed,
            hue
        );
    }

    particles::update(&mut state.particles);
    bounced
}
