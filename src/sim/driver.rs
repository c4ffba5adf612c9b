//! Animation driver: the Idle/Running state machine around one session
//!
//! The platform calls [`Driver::frame`] once per display frame with the
//! [`RunToken`] it was handed on start. A token from an earlier run is stale:
//! the frame does nothing and asks not to be rescheduled.

use glam::Vec2;

use super::shape::{Arena, ShapeKind};
use super::state::{SimEvent, SimState};
use super::tick::tick;
use crate::audio::{Tone, ToneSink};
use crate::settings::Settings;

/// Driver phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverPhase {
    #[default]
    Idle,
    Running,
}

/// Proof of the run a frame callback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Result of a start/stop toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started(RunToken),
    Stopped,
}

/// What the frame loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Reschedule,
    Halt,
}

pub struct Driver {
    state: SimState,
    settings: Settings,
    shape: ShapeKind,
    arena: Arena,
    phase: DriverPhase,
    generation: u64,
}

impl Driver {
    pub fn new(seed: u64, settings: Settings, surface_size: Vec2) -> Self {
        let arena = Arena::for_surface(surface_size);
        let mut driver = Self {
            state: SimState::new(seed, arena.center, &settings),
            settings,
            shape: ShapeKind::default(),
            arena,
            phase: DriverPhase::Idle,
            generation: 0,
        };
        driver.fit_ball();
        driver
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    /// Idle -> Running. Resets the session and hands out a fresh token.
    pub fn start(&mut self) -> Option<RunToken> {
        if self.is_running() {
            return None;
        }
        self.reset_state();
        self.generation += 1;
        self.phase = DriverPhase::Running;
        log::info!(
            "Started on {} at speed {:.1}",
            self.shape.as_str(),
            self.settings.speed
        );
        Some(RunToken(self.generation))
    }

    /// Running -> Idle. Every outstanding token goes stale.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.generation += 1;
        self.phase = DriverPhase::Idle;
        log::info!(
            "Stopped after {} bounces, speed {:.1}",
            self.state.stats.bounce_count,
            self.state.stats.speed
        );
        true
    }

    pub fn toggle(&mut self) -> Transition {
        match self.start() {
            Some(token) => Transition::Started(token),
            None => {
                self.stop();
                Transition::Stopped
            }
        }
    }

    /// Re-center the resting ball with a new heading
    pub fn reset(&mut self) -> bool {
        self.when_idle("reset", |d| {
            d.reset_state();
            log::info!("Reset");
        })
    }

    pub fn select_shape(&mut self, kind: ShapeKind) -> bool {
        self.when_idle("shape change", |d| {
            d.shape = kind;
            d.reset_state();
            log::info!("Shape set to {}", kind.as_str());
        })
    }

    pub fn set_speed(&mut self, speed: f32) -> bool {
        self.when_idle("speed change", |d| {
            d.settings.set_speed(speed);
            d.reset_state();
        })
    }

    pub fn set_ball_size(&mut self, size: f32) -> bool {
        self.when_idle("ball size change", |d| {
            d.settings.set_ball_size(size);
            d.fit_ball();
        })
    }

    pub fn set_tempo_increase(&mut self, percent: f32) -> bool {
        self.when_idle("tempo change", |d| d.settings.set_tempo_increase(percent))
    }

    pub fn toggle_trails(&mut self) -> bool {
        self.when_idle("trail toggle", |d| d.settings.trails = !d.settings.trails)
    }

    pub fn toggle_glow(&mut self) -> bool {
        self.when_idle("glow toggle", |d| d.settings.glow = !d.settings.glow)
    }

    pub fn toggle_particles(&mut self) -> bool {
        self.when_idle("particle toggle", |d| {
            d.settings.particles = !d.settings.particles
        })
    }

    /// Follow a surface resize, running or not. The ball, trail and particles
    /// keep their place relative to the shape; a resize never counts as a bounce.
    pub fn resize(&mut self, surface_size: Vec2) {
        let old = self.arena;
        self.arena = Arena::for_surface(surface_size);
        self.state.remap(&old, &self.arena);
        self.fit_ball();
        log::debug!(
            "Arena resized: size {:.1} -> {:.1}",
            old.size,
            self.arena.size
        );
    }

    /// Run one frame for `token`, sending bounce tones to `tones`
    pub fn frame<T: ToneSink + ?Sized>(&mut self, token: RunToken, tones: &mut T) -> FrameOutcome {
        if !self.is_running() || token.0 != self.generation {
            return FrameOutcome::Halt;
        }

        tick(&mut self.state, self.shape, &self.arena, &self.settings);
        for event in self.state.events.drain(..) {
            match event {
                SimEvent::Bounce { hue, .. } => tones.play_tone(Tone::for_hue(hue)),
            }
        }
        FrameOutcome::Reschedule
    }

    fn reset_state(&mut self) {
        self.state.reset(self.arena.center, &self.settings);
        self.fit_ball();
    }

    /// Cap the radius to the arena and make sure the ball is not touching the boundary
    fn fit_ball(&mut self) {
        self.state.ball.radius = self.arena.fit_radius(self.settings.ball_size);
        let boundary = self.shape.boundary();
        if boundary.check_collision(&self.state.ball, &self.arena) {
            boundary.contain(&mut self.state.ball, &self.arena);
        }
    }

    fn when_idle(&mut self, what: &str, apply: impl FnOnce(&mut Self)) -> bool {
        if self.is_running() {
            log::debug!("Ignoring {} while running", what);
            return false;
        }
        apply(self);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver {
        Driver::new(99, Settings::default(), Vec2::new(400.0, 400.0))
    }

    #[test]
    fn test_start_stop_cycle() {
        let mut d = driver();
        assert_eq!(d.phase(), DriverPhase::Idle);

        let token = d.start().unwrap();
        assert!(d.is_running());
        assert!(d.start().is_none());

        assert!(d.stop());
        assert!(!d.stop());
        assert_eq!(d.phase(), DriverPhase::Idle);

        let mut tones: Vec<Tone> = Vec::new();
        assert_eq!(d.frame(token, &mut tones), FrameOutcome::Halt);
    }

    #[test]
    fn test_toggle() {
        let mut d = driver();
        assert!(matches!(d.toggle(), Transition::Started(_)));
        assert_eq!(d.toggle(), Transition::Stopped);
        assert!(!d.is_running());
    }

    #[test]
    fn test_stale_token_halts() {
        let mut d = driver();
        let old = d.start().unwrap();
        d.stop();
        let new = d.start().unwrap();
        assert_ne!(old, new);

        let mut tones: Vec<Tone> = Vec::new();
        let before = d.state().ball.pos;
        assert_eq!(d.frame(old, &mut tones), FrameOutcome::Halt);
        assert_eq!(d.state().ball.pos, before);
        assert_eq!(d.frame(new, &mut tones), FrameOutcome::Reschedule);
        assert_ne!(d.state().ball.pos, before);
    }

    #[test]
    fn test_idle_only_commands_rejected_while_running() {
        let mut d = driver();
        d.start();
        let settings = d.settings().clone();

        assert!(!d.reset());
        assert!(!d.select_shape(ShapeKind::Hexagon));
        assert!(!d.set_speed(12.0));
        assert!(!d.set_ball_size(40.0));
        assert!(!d.set_tempo_increase(15.0));
        assert!(!d.toggle_trails());
        assert!(!d.toggle_glow());
        assert!(!d.toggle_particles());

        assert_eq!(d.shape(), ShapeKind::Circle);
        assert_eq!(d.settings(), &settings);
    }

    #[test]
    fn test_idle_commands_apply() {
        let mut d = driver();
        assert!(d.select_shape(ShapeKind::Triangle));
        assert_eq!(d.shape(), ShapeKind::Triangle);

        assert!(d.set_speed(12.0));
        assert!((d.state().ball.speed() - 12.0).abs() < 1e-4);

        assert!(d.set_ball_size(40.0));
        assert_eq!(d.state().ball.radius, 40.0);

        assert!(d.set_tempo_increase(15.0));
        assert_eq!(d.settings().tempo_increase, 15.0);

        assert!(d.toggle_trails());
        assert!(!d.settings().trails);
        assert!(d.toggle_glow());
        assert!(!d.settings().glow);
        assert!(d.toggle_particles());
        assert!(!d.settings().particles);
    }

    #[test]
    fn test_start_resets_session() {
        let mut d = driver();
        let token = d.start().unwrap();
        let mut tones: Vec<Tone> = Vec::new();
        while d.state().stats.bounce_count == 0 {
            d.frame(token, &mut tones);
        }
        d.stop();

        d.start();
        let state = d.state();
        assert_eq!(state.stats.bounce_count, 0);
        assert_eq!(state.ball.hue, 0);
        assert_eq!(state.ball.pos, d.arena().center);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_bounces_emit_tones() {
        let mut d = driver();
        let token = d.start().unwrap();
        let mut tones: Vec<Tone> = Vec::new();
        for _ in 0..600 {
            d.frame(token, &mut tones);
        }

        let stats = &d.state().stats;
        assert!(stats.bounce_count > 0);
        assert_eq!(tones.len(), stats.bounce_count as usize);
        assert_eq!(d.state().ball.hue, ((30 * stats.bounce_count) % 360) as u16);
        assert_eq!(tones.last(), Some(&Tone::for_hue(d.state().ball.hue)));
        assert!(d.state().events.is_empty());

        let expected = 5.0 * 1.05f32.powi(stats.bounce_count as i32);
        assert!((stats.speed - expected).abs() / expected < 1e-3);
    }

    #[test]
    fn test_resize_moves_resting_ball() {
        let mut d = driver();
        d.resize(Vec2::new(800.0, 600.0));
        assert_eq!(d.arena().center, Vec2::new(400.0, 300.0));
        assert_eq!(d.arena().size, 300.0);
        assert_eq!(d.state().ball.pos, d.arena().center);
    }

    #[test]
    fn test_resize_maps_off_center_ball() {
        let mut d = driver();
        let token = d.start().unwrap();
        let mut tones: Vec<Tone> = Vec::new();
        for _ in 0..5 {
            d.frame(token, &mut tones);
        }
        d.stop();
        let offset = d.state().ball.pos - d.arena().center;
        assert!(offset.length() > 20.0);

        d.resize(Vec2::new(800.0, 800.0));
        let mapped = d.state().ball.pos - d.arena().center;
        assert!((mapped - offset * 2.0).length() < 1e-3);
    }

    #[test]
    fn test_resize_mid_run_is_not_a_bounce() {
        let mut d = driver();
        assert!(d.select_shape(ShapeKind::Square));
        let token = d.start().unwrap();
        let mut tones: Vec<Tone> = Vec::new();
        for _ in 0..5 {
            d.frame(token, &mut tones);
        }
        let offset = d.state().ball.pos - d.arena().center;
        let vel = d.state().ball.vel;
        let boundary = ShapeKind::Square.boundary();

        // Grow: the ball keeps its place relative to the new center
        d.resize(Vec2::new(800.0, 800.0));
        assert!(d.is_running());
        let mapped = d.state().ball.pos - d.arena().center;
        assert!((mapped - offset * 2.0).length() < 1e-3);
        assert_eq!(d.state().ball.vel, vel);
        assert_eq!(d.frame(token, &mut tones), FrameOutcome::Reschedule);
        assert_eq!(d.state().stats.bounce_count, 0);
        assert!(!boundary.check_collision(&d.state().ball, d.arena()));

        // Shrink: still inside, still no bounce
        d.resize(Vec2::new(120.0, 120.0));
        assert!(!boundary.check_collision(&d.state().ball, d.arena()));
        d.frame(token, &mut tones);
        assert_eq!(d.state().stats.bounce_count, 0);
        assert!(tones.is_empty());
        assert!(!boundary.check_collision(&d.state().ball, d.arena()));
        assert_eq!(d.state().ball.speed(), vel.length());
    }

    #[test]
    fn test_resize_into_too_small_arena_pushes_ball_inside() {
        let mut d = driver();
        d.state.ball.pos = d.arena().center + Vec2::new(150.0, 0.0);
        d.resize(Vec2::new(60.0, 60.0));
        let ball = &d.state().ball;
        assert!(ball.radius <= d.arena().size * 0.25);
        assert!(!ShapeKind::Circle.boundary().check_collision(ball, d.arena()));
    }

    #[test]
    fn test_ball_radius_fits_tiny_surface() {
        let mut d = Driver::new(4, Settings::default(), Vec2::new(30.0, 30.0));
        assert_eq!(d.state().ball.radius, 3.75);
        assert!(d.set_ball_size(50.0));
        assert_eq!(d.state().ball.radius, 3.75);
        assert_eq!(d.settings().ball_size, 50.0);

        let token = d.start().unwrap();
        let mut tones: Vec<Tone> = Vec::new();
        // From the center the ball needs more than two frames to reach the wall
        for _ in 0..2 {
            d.frame(token, &mut tones);
        }
        assert_eq!(d.state().stats.bounce_count, 0);
        for _ in 0..18 {
            d.frame(token, &mut tones);
        }
        assert!(d.state().stats.bounce_count < 10);

        // A larger surface gives the configured size back
        d.resize(Vec2::new(400.0, 400.0));
        assert_eq!(d.state().ball.radius, 50.0);
    }
}
