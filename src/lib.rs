//! Shape Bounce - a ball bouncing inside a selectable enclosing shape
//!
//! Core modules:
//! - `sim`: Simulation (shape boundaries, physics stepper, particles, animation driver)
//! - `renderer`: Draw-command surface and WebGPU rendering pipeline
//! - `audio`: Bounce tones (Web Audio on wasm, recording elsewhere)
//! - `platform`: Browser/native platform abstraction (input mapping, frame loop)
//! - `settings`: User-tunable settings and their ranges

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Shape size as a fraction of the smaller canvas dimension
    pub const SHAPE_SIZE_FACTOR: f32 = 0.5;
    /// Largest ball radius as a fraction of the shape size
    pub const MAX_BALL_FRACTION: f32 = 0.25;

    /// Hue advance per bounce (degrees)
    pub const HUE_STEP: u16 = 30;

    /// Distance the ball is pushed inside the boundary after a reflection
    pub const CONTACT_SLOP: f32 = 0.01;

    /// Tempo heuristic: bpm = 60 / (speed / TEMPO_SPEED_SCALE)
    pub const TEMPO_SPEED_SCALE: f32 = 10.0;
    /// Tempo shown before the first bounce
    pub const INITIAL_TEMPO_BPM: u32 = 60;
    /// Below this speed the tempo display reads 0
    pub const MIN_TEMPO_SPEED: f32 = 1e-3;

    /// Particle burst
    pub const BURST_PARTICLES: usize = 8;
    pub const PARTICLE_MIN_SPEED: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;
    pub const PARTICLE_DRAG: f32 = 0.98;
    /// Ticks a particle lives; life falls by 1/50 = 0.02 per tick
    pub const PARTICLE_LIFETIME: u32 = 50;
    pub const PARTICLE_MAX_RADIUS: f32 = 3.0;

    /// Bounce tone (hue 0..360 maps onto TONE_BASE_HZ..TONE_BASE_HZ + TONE_SPAN_HZ)
    pub const TONE_BASE_HZ: f32 = 200.0;
    pub const TONE_SPAN_HZ: f32 = 600.0;
    pub const TONE_DURATION: f64 = 0.1;
    pub const TONE_PEAK_GAIN: f32 = 0.3;
    pub const TONE_FLOOR_GAIN: f32 = 0.01;

    /// Number of ball positions kept for the trails effect
    pub const TRAIL_LENGTH: usize = 20;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
