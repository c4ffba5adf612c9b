//! Simulation state and core types
//!
//! Everything one session mutates lives in [`SimState`], owned by the driver.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particles;
use super::shape::Arena;
use crate::consts::*;
use crate::settings::Settings;

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
}

/// The bouncing ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Color hue in degrees, 0..360
    pub hue: u16,
    /// Trail history for rendering (newest first)
    pub trail: Vec<TrailPoint>,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            hue: 0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Step the hue forward by one bounce
    pub fn advance_hue(&mut self) {
        self.hue = (self.hue + HUE_STEP) % 360;
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, TrailPoint { pos: self.pos });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    /// Clear trail (on reset)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// A burst particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks lived so far
    pub age: u32,
    pub hue: u16,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, hue: u16) -> Self {
        Self { pos, vel, age: 0, hue }
    }

    /// Remaining life, 1 -> 0 over `PARTICLE_LIFETIME` ticks
    pub fn life(&self) -> f32 {
        1.0 - self.age.min(PARTICLE_LIFETIME) as f32 / PARTICLE_LIFETIME as f32
    }

    pub fn is_expired(&self) -> bool {
        self.age >= PARTICLE_LIFETIME
    }
}

/// Counters shown on the page
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub bounce_count: u32,
    pub tempo_bpm: u32,
    pub speed: f32,
}

impl Stats {
    pub fn new(speed: f32) -> Self {
        Self {
            bounce_count: 0,
            tempo_bpm: INITIAL_TEMPO_BPM,
            speed,
        }
    }

    /// Speed formatted the way the readout shows it
    pub fn speed_label(&self) -> String {
        format!("{:.1}", self.speed)
    }
}

/// Display tempo for a given speed: round(60 / (speed / 10)).
///
/// Returns 0 when the speed is too small to give a finite tempo.
pub fn tempo_bpm(speed: f32) -> u32 {
    if speed.is_nan() || speed <= MIN_TEMPO_SPEED {
        return 0;
    }
    (60.0 / (speed / TEMPO_SPEED_SCALE)).round() as u32
}

/// Side effects produced by a tick, drained by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// The ball hit the boundary (values after the bounce was applied)
    Bounce { point: Vec2, hue: u16, speed: f32 },
}

/// Simulation context for one session
#[derive(Debug, Clone)]
pub struct SimState {
    pub ball: Ball,
    pub particles: Vec<Particle>,
    pub stats: Stats,
    /// Events raised since the last drain
    pub events: Vec<SimEvent>,
    rng: Pcg32,
}

impl SimState {
    /// Create a state with the ball resting at `center`
    pub fn new(seed: u64, center: Vec2, settings: &Settings) -> Self {
        let mut state = Self {
            ball: Ball::new(center, Vec2::ZERO, settings.ball_size),
            particles: Vec::new(),
            stats: Stats::new(settings.speed),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset(center, settings);
        state
    }

    /// Put the ball back at the center with a random heading and clear counters
    pub fn reset(&mut self, center: Vec2, settings: &Settings) {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        self.ball.pos = center;
        self.ball.vel = Vec2::new(angle.cos(), angle.sin()) * settings.speed;
        self.ball.radius = settings.ball_size;
        self.ball.hue = 0;
        self.ball.clear_trail();
        self.particles.clear();
        self.events.clear();
        self.stats = Stats::new(settings.speed);
    }

    /// Carry the ball, its trail and the particles from one arena into another.
    /// Velocities are left alone.
    pub fn remap(&mut self, from: &Arena, to: &Arena) {
        self.ball.pos = to.map_point(from, self.ball.pos);
        for point in &mut self.ball.trail {
            point.pos = to.map_point(from, point.pos);
        }
        for particle in &mut self.particles {
            particle.pos = to.map_point(from, particle.pos);
        }
    }

    /// Spawn a particle burst at `origin` in the given hue
    pub fn burst_at(&mut self, origin: Vec2, hue: u16) {
        particles::burst(&mut self.particles, origin, hue, &mut self.rng);
    }
}
