//! WebGPU rendering module
//!
//! Scene code draws into a [`Frame`] through the [`Surface`] trait; the
//! pipeline tessellates the frame into colored triangles and presents it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{compose, draw_scene};
pub use surface::{DrawCommand, Frame, Rgba, Surface};
