//! Bounce particle bursts

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Spawn a radial fan of particles at `origin`
pub fn burst<R: Rng>(particles: &mut Vec<Particle>, origin: Vec2, hue: u16, rng: &mut R) {
    let step = TAU / BURST_PARTICLES as f32;
    particles.extend((0..BURST_PARTICLES).map(|i| {
        let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        Particle::new(origin, polar_to_cartesian(speed, step * i as f32), hue)
    }));
}

/// Advance every particle one tick and drop the expired ones
pub fn update(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.age += 1;
        particle.vel *= PARTICLE_DRAG;
    }
    particles.retain(|p| !p.is_expired());
}
