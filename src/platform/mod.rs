//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard shortcuts)
//! - Frame scheduling (`requestAnimationFrame` on web)
//! - Page controls and readouts

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frame_loop;
