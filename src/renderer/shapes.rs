//! Shape generation for 2D primitives
//!
//! Turns recorded [`DrawCommand`]s into a flat triangle list in pixel
//! coordinates. The pipeline maps pixels to clip space afterwards.

use glam::Vec2;
use std::f32::consts::PI;

use super::surface::{DrawCommand, Frame, Rgba};
use super::vertex::Vertex;

/// Segment count for a circle of the given radius
fn segments_for(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(12, 96)
}

fn push_quad(vertices: &mut Vec<Vertex>, a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2, color: Rgba) {
    // Two triangles
    vertices.push(Vertex::new(a0.x, a0.y, color));
    vertices.push(Vertex::new(a1.x, a1.y, color));
    vertices.push(Vertex::new(b0.x, b0.y, color));

    vertices.push(Vertex::new(b0.x, b0.y, color));
    vertices.push(Vertex::new(a1.x, a1.y, color));
    vertices.push(Vertex::new(b1.x, b1.y, color));
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: Rgba) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        min,
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, min.y),
        max,
        color,
    );
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Rgba,
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let inner_radius = inner_radius.max(0.0);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        push_quad(
            &mut vertices,
            center + dir1 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * inner_radius,
            center + dir2 * outer_radius,
            color,
        );
    }

    vertices
}

/// Generate vertices for a stroked polyline with mitered joints
pub fn polyline(points: &[Vec2], closed: bool, width: f32, color: Rgba) -> Vec<Vertex> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    let half = width * 0.5;
    let seg_count = if closed { n } else { n - 1 };

    let normal = |i: usize| {
        let dir = (points[(i + 1) % n] - points[i]).normalize_or_zero();
        Vec2::new(-dir.y, dir.x)
    };

    // Offset from each point to the outer edge of the stroke
    let offsets: Vec<Vec2> = (0..n)
        .map(|i| {
            let prev = if i > 0 {
                Some(normal(i - 1))
            } else if closed {
                Some(normal(n - 1))
            } else {
                None
            };
            let next = (i < seg_count).then(|| normal(i));
            match (prev, next) {
                (Some(a), Some(b)) => {
                    let miter = (a + b).normalize_or_zero();
                    let cos = miter.dot(b);
                    // Near-reversal: fall back to a butt joint
                    if cos.abs() < 0.1 {
                        b * half
                    } else {
                        miter * (half / cos)
                    }
                }
                (Some(a), None) => a * half,
                (None, Some(b)) => b * half,
                (None, None) => Vec2::ZERO,
            }
        })
        .collect();

    let mut vertices = Vec::with_capacity(seg_count * 6);
    for i in 0..seg_count {
        let j = (i + 1) % n;
        let (a, b) = (points[i], points[j]);
        let (oa, ob) = (offsets[i], offsets[j]);
        push_quad(&mut vertices, a + oa, a - oa, b + ob, b - ob, color);
    }
    vertices
}

/// Tessellate every command of a frame, in draw order
pub fn tessellate(frame: &Frame) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in frame.commands() {
        match command {
            DrawCommand::FillRect { min, max, color } => {
                vertices.extend(rect(*min, *max, *color));
            }
            DrawCommand::StrokePath {
                points,
                closed,
                width,
                color,
            } => {
                vertices.extend(polyline(points, *closed, *width, *color));
            }
            DrawCommand::FillArc {
                center,
                radius,
                color,
            } => {
                vertices.extend(circle(*center, *radius, *color, segments_for(*radius)));
            }
            DrawCommand::StrokeArc {
                center,
                radius,
                width,
                color,
            } => {
                // Stroke is centered on the path, as on a 2D canvas
                let half = width * 0.5;
                vertices.extend(ring(
                    *center,
                    radius - half,
                    radius + half,
                    *color,
                    segments_for(radius + half),
                ));
            }
        }
    }
    vertices
}
