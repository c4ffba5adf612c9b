//! Drawing surface abstraction
//!
//! The simulation and scene code draw through [`Surface`]; [`Frame`] records
//! the calls so the GPU pipeline (or a test) can consume them afterwards.

use glam::Vec2;

/// Straight RGBA color, components in 0..1
pub type Rgba = [f32; 4];

/// A recorded drawing primitive (pixel coordinates, y down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        min: Vec2,
        max: Vec2,
        color: Rgba,
    },
    StrokePath {
        points: Vec<Vec2>,
        closed: bool,
        width: f32,
        color: Rgba,
    },
    FillArc {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokeArc {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    },
}

/// Something that accepts draw calls
pub trait Surface {
    /// Size in logical pixels
    fn size(&self) -> Vec2;
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba);
    fn stroke_path(&mut self, points: &[Vec2], closed: bool, width: f32, color: Rgba);
    /// Filled full circle
    fn fill_arc(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Circle outline
    fn stroke_arc(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba);
}

/// One frame worth of draw commands
#[derive(Debug, Clone, Default)]
pub struct Frame {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for Frame {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { min, max, color });
    }

    fn stroke_path(&mut self, points: &[Vec2], closed: bool, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            closed,
            width,
            color,
        });
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillArc {
            center,
            radius,
            color,
        });
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            radius,
            width,
            color,
        });
    }
}
