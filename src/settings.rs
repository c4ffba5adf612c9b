//! User settings
//!
//! Driven by the sliders and toggles of the page. Never persisted; a page can
//! seed the initial values with a JSON `data-settings` attribute.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Initial ball speed slider range (pixels per frame)
pub const SPEED_RANGE: RangeInclusive<f32> = 1.0..=20.0;
/// Ball radius slider range (pixels)
pub const BALL_SIZE_RANGE: RangeInclusive<f32> = 5.0..=50.0;
/// Speed gain per bounce slider range (percent)
pub const TEMPO_INCREASE_RANGE: RangeInclusive<f32> = 0.0..=20.0;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Initial velocity magnitude on start/reset
    pub speed: f32,
    /// Ball radius
    pub ball_size: f32,
    /// Percent speed gain per bounce
    pub tempo_increase: f32,

    // === Visual Effects ===
    /// Fading ball trail
    pub trails: bool,
    /// Soft halo around the ball
    pub glow: bool,
    /// Particle burst on every bounce
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 5.0,
            ball_size: 20.0,
            tempo_increase: 5.0,

            // Visual effects - all on by default
            trails: true,
            glow: true,
            particles: true,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every numeric field against its slider range
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("speed", self.speed, &SPEED_RANGE)?;
        check_range("ballSize", self.ball_size, &BALL_SIZE_RANGE)?;
        check_range("tempoIncrease", self.tempo_increase, &TEMPO_INCREASE_RANGE)?;
        Ok(())
    }

    /// Velocity multiplier applied on every bounce
    pub fn bounce_multiplier(&self) -> f32 {
        1.0 + self.tempo_increase / 100.0
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp_to(speed, &SPEED_RANGE);
    }

    pub fn set_ball_size(&mut self, ball_size: f32) {
        self.ball_size = clamp_to(ball_size, &BALL_SIZE_RANGE);
    }

    pub fn set_tempo_increase(&mut self, percent: f32) {
        self.tempo_increase = clamp_to(percent, &TEMPO_INCREASE_RANGE);
    }
}

fn check_range(
    field: &'static str,
    value: f32,
    range: &RangeInclusive<f32>,
) -> Result<(), SettingsError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Clamp slider input; NaN falls back to the range start
fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
