//! Deterministic simulation module
//!
//! All bouncing logic lives here. This module must stay deterministic:
//! - Fixed per-frame step, no delta time
//! - Seeded RNG only
//! - No platform dependencies; drawing goes through the `Surface` trait

pub mod collision;
pub mod driver;
pub mod particles;
pub mod shape;
pub mod state;
pub mod tick;

pub use driver::{Driver, DriverPhase, FrameOutcome, RunToken, Transition};
pub use shape::{Arena, Boundary, ShapeKind};
pub use state::{Ball, Particle, SimEvent, SimState, Stats, TrailPoint, tempo_bpm};
pub use tick::tick;
