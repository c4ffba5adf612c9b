//! Enclosing shapes the ball bounces inside
//!
//! Every shape implements [`Boundary`]: a collision test, a reflection that
//! resolves the contact, and an outline draw. [`ShapeKind`] selects one.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    clamp_into_convex, convex_contains, distance_to_segment, inward_normal, nearest_edge,
    reflect_velocity,
};
use super::state::Ball;
use crate::consts::{CONTACT_SLOP, MAX_BALL_FRACTION, SHAPE_SIZE_FACTOR};
use crate::polar_to_cartesian;
use crate::renderer::Surface;
use crate::renderer::vertex::colors;

/// Outline stroke width in pixels
pub const OUTLINE_WIDTH: f32 = 3.0;

/// Shared geometry for every shape: center of the surface and size scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub center: Vec2,
    /// Half the smaller surface dimension
    pub size: f32,
}

impl Arena {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self { center, size }
    }

    /// Arena centered on a surface of the given pixel size
    pub fn for_surface(surface_size: Vec2) -> Self {
        Self {
            center: surface_size * 0.5,
            size: surface_size.x.min(surface_size.y) * SHAPE_SIZE_FACTOR,
        }
    }

    /// Largest radius that still leaves the ball room to move in every shape
    pub fn fit_radius(&self, radius: f32) -> f32 {
        radius.min(self.size * MAX_BALL_FRACTION)
    }

    /// Carry a point from `from` into this arena, keeping its place relative to the shape
    pub fn map_point(&self, from: &Arena, p: Vec2) -> Vec2 {
        let scale = if from.size > 0.0 { self.size / from.size } else { 1.0 };
        self.center + (p - from.center) * scale
    }
}

/// Collision contract shared by all shapes
pub trait Boundary {
    /// True when the ball's edge has reached or passed the boundary
    fn check_collision(&self, ball: &Ball, arena: &Arena) -> bool;

    /// Reflect the ball's velocity off the boundary and move it back inside
    fn reflect(&self, ball: &mut Ball, arena: &Arena);

    /// Move the ball back inside without touching its velocity
    fn contain(&self, ball: &mut Ball, arena: &Arena);

    /// Stroke the outline
    fn draw(&self, surface: &mut dyn Surface, arena: &Arena);
}

/// Shape selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
    Triangle,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Hexagon => "hexagon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" => Some(ShapeKind::Circle),
            "square" => Some(ShapeKind::Square),
            "triangle" => Some(ShapeKind::Triangle),
            "hexagon" | "hex" => Some(ShapeKind::Hexagon),
            _ => None,
        }
    }

    /// The boundary implementation for this shape
    pub fn boundary(&self) -> &'static dyn Boundary {
        match self {
            ShapeKind::Circle => &CircleBoundary,
            ShapeKind::Square => &SquareBoundary,
            ShapeKind::Triangle => &TRIANGLE,
            ShapeKind::Hexagon => &HEXAGON,
        }
    }
}

/// Circle of radius `size`
#[derive(Debug, Clone, Copy)]
pub struct CircleBoundary;

impl Boundary for CircleBoundary {
    fn check_collision(&self, ball: &Ball, arena: &Arena) -> bool {
        (ball.pos - arena.center).length() >= arena.size - ball.radius
    }

    fn reflect(&self, ball: &mut Ball, arena: &Arena) {
        let offset = ball.pos - arena.center;
        let outward = offset.normalize_or_zero();
        if outward == Vec2::ZERO {
            return; // Ball at dead center: no defined normal
        }

        if ball.vel.dot(outward) > 0.0 {
            ball.vel = reflect_velocity(ball.vel, outward);
        }
        self.contain(ball, arena);
    }

    fn contain(&self, ball: &mut Ball, arena: &Arena) {
        let offset = ball.pos - arena.center;
        // Back onto the inset circle
        let max_dist = (arena.size - ball.radius - CONTACT_SLOP).max(0.0);
        if offset.length() > max_dist {
            ball.pos = arena.center + offset.normalize_or_zero() * max_dist;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, arena: &Arena) {
        surface.stroke_arc(arena.center, arena.size, OUTLINE_WIDTH, colors::OUTLINE);
    }
}

/// Axis-aligned square with half-width `size`
#[derive(Debug, Clone, Copy)]
pub struct SquareBoundary;

impl Boundary for SquareBoundary {
    fn check_collision(&self, ball: &Ball, arena: &Arena) -> bool {
        let (min, max) = square_bounds(arena);
        let r = ball.radius;
        ball.pos.x - r <= min.x
            || ball.pos.x + r >= max.x
            || ball.pos.y - r <= min.y
            || ball.pos.y + r >= max.y
    }

    fn reflect(&self, ball: &mut Ball, arena: &Arena) {
        let (min, max) = square_bounds(arena);
        let r = ball.radius;
        let (x, y) = (ball.pos.x, ball.pos.y);

        // Each edge is handled on its own so corner hits flip both axes
        if x - r <= min.x {
            ball.vel.x = ball.vel.x.abs();
        }
        if x + r >= max.x {
            ball.vel.x = -ball.vel.x.abs();
        }
        if y - r <= min.y {
            ball.vel.y = ball.vel.y.abs();
        }
        if y + r >= max.y {
            ball.vel.y = -ball.vel.y.abs();
        }
        self.contain(ball, arena);
    }

    fn contain(&self, ball: &mut Ball, arena: &Arena) {
        let (min, max) = square_bounds(arena);
        let r = ball.radius;
        let (x, y) = (ball.pos.x, ball.pos.y);

        if x - r <= min.x {
            ball.pos.x = min.x + r + CONTACT_SLOP;
        }
        if x + r >= max.x {
            ball.pos.x = max.x - r - CONTACT_SLOP;
        }
        if y - r <= min.y {
            ball.pos.y = min.y + r + CONTACT_SLOP;
        }
        if y + r >= max.y {
            ball.pos.y = max.y - r - CONTACT_SLOP;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, arena: &Arena) {
        let (min, max) = square_bounds(arena);
        let corners = [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ];
        surface.stroke_path(&corners, true, OUTLINE_WIDTH, colors::OUTLINE);
    }
}

fn square_bounds(arena: &Arena) -> (Vec2, Vec2) {
    let half = Vec2::splat(arena.size);
    (arena.center - half, arena.center + half)
}

/// Regular polygon with circumradius `size`.
///
/// Vertex `i` sits at angle `start_angle + i * step` (screen coordinates, y
/// down); edge `i` joins vertex `i` to vertex `i + 1`.
#[derive(Debug, Clone, Copy)]
pub struct RegularPolygon {
    pub sides: usize,
    pub start_angle: f32,
    pub step: f32,
}

/// Point up, then bottom-left, then bottom-right
pub static TRIANGLE: RegularPolygon = RegularPolygon {
    sides: 3,
    start_angle: -FRAC_PI_2,
    step: -TAU / 3.0,
};

/// Flat top and bottom, first vertex on the right
pub static HEXAGON: RegularPolygon = RegularPolygon {
    sides: 6,
    start_angle: 0.0,
    step: PI / 3.0,
};

impl RegularPolygon {
    /// Polygon vertices for a given circumradius
    pub fn vertices_with_radius(&self, center: Vec2, radius: f32) -> Vec<Vec2> {
        (0..self.sides)
            .map(|i| center + polar_to_cartesian(radius, self.start_angle + i as f32 * self.step))
            .collect()
    }

    pub fn vertices(&self, arena: &Arena) -> Vec<Vec2> {
        self.vertices_with_radius(arena.center, arena.size)
    }

    /// Circumradius of the polygon shrunk by `inset` along every edge normal
    pub fn inset_radius(&self, arena: &Arena, inset: f32) -> f32 {
        let apothem_ratio = (PI / self.sides as f32).cos();
        (arena.size - inset / apothem_ratio).max(0.0)
    }

    /// Vertices of the region the ball center may occupy without touching an edge
    pub fn inset_vertices(&self, arena: &Arena, inset: f32) -> Vec<Vec2> {
        self.vertices_with_radius(arena.center, self.inset_radius(arena, inset))
    }
}

impl Boundary for RegularPolygon {
    fn check_collision(&self, ball: &Ball, arena: &Arena) -> bool {
        let vertices = self.vertices(arena);
        let n = vertices.len();
        // A center outside the polygon has passed the boundary entirely
        !convex_contains(ball.pos, &vertices, arena.center)
            || (0..n).any(|i| {
                distance_to_segment(ball.pos, vertices[i], vertices[(i + 1) % n]) < ball.radius
            })
    }

    fn reflect(&self, ball: &mut Ball, arena: &Arena) {
        let vertices = self.vertices(arena);
        let n = vertices.len();

        if let Some((edge, _)) = nearest_edge(ball.pos, &vertices) {
            let normal = inward_normal(vertices[edge], vertices[(edge + 1) % n], arena.center);
            if ball.vel.dot(normal) < 0.0 {
                ball.vel = reflect_velocity(ball.vel, normal);
            }
        }
        self.contain(ball, arena);
    }

    fn contain(&self, ball: &mut Ball, arena: &Arena) {
        let clearance = ball.radius + CONTACT_SLOP;
        if self.inset_radius(arena, clearance) <= 0.0 {
            ball.pos = arena.center; // Ball too large for the shape
        } else {
            let inset = self.inset_vertices(arena, clearance);
            ball.pos = clamp_into_convex(ball.pos, &inset, arena.center);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, arena: &Arena) {
        surface.stroke_path(&self.vertices(arena), true, OUTLINE_WIDTH, colors::OUTLINE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Frame};

    const SIZE: f32 = 200.0;
    const RADIUS: f32 = 20.0;

    fn arena() -> Arena {
        Arena::new(Vec2::new(300.0, 200.0), SIZE)
    }

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(pos, vel, RADIUS)
    }

    #[test]
    fn test_arena_for_surface() {
        let arena = Arena::for_surface(Vec2::new(800.0, 600.0));
        assert_eq!(arena.center, Vec2::new(400.0, 300.0));
        assert_eq!(arena.size, 300.0);
    }

    #[test]
    fn test_arena_fit_radius() {
        let small = Arena::for_surface(Vec2::new(30.0, 30.0));
        assert_eq!(small.fit_radius(20.0), 3.75);
        assert_eq!(arena().fit_radius(RADIUS), RADIUS);
    }

    #[test]
    fn test_arena_map_point() {
        let from = arena();
        let to = Arena::new(Vec2::new(100.0, 100.0), SIZE / 2.0);
        assert_eq!(to.map_point(&from, from.center), to.center);
        let p = from.center + Vec2::new(80.0, -40.0);
        assert_eq!(to.map_point(&from, p), Vec2::new(140.0, 80.0));
    }

    #[test]
    fn test_shape_kind_from_str() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::from_str("Hexagon"), Some(ShapeKind::Hexagon));
        assert_eq!(ShapeKind::from_str("star"), None);
    }

    #[test]
    fn test_center_is_clear_for_every_shape() {
        let arena = arena();
        for kind in ShapeKind::ALL {
            let ball = ball_at(arena.center, Vec2::new(3.0, 4.0));
            assert!(!kind.boundary().check_collision(&ball, &arena), "{:?}", kind);
        }
    }

    #[test]
    fn test_circle_radial_bounce() {
        let arena = arena();
        let boundary = CircleBoundary;
        let vel = Vec2::new(3.0, 0.0);
        let mut ball = ball_at(arena.center + Vec2::new(SIZE - RADIUS - 1.0, 0.0), vel);
        assert!(!boundary.check_collision(&ball, &arena));

        // One tick outward
        ball.pos += ball.vel;
        assert!(boundary.check_collision(&ball, &arena));

        boundary.reflect(&mut ball, &arena);
        assert!((ball.vel - Vec2::new(-3.0, 0.0)).length() < 1e-5);
        assert!((ball.speed() - 3.0).abs() < 1e-5);
        assert!(!boundary.check_collision(&ball, &arena));
    }

    #[test]
    fn test_circle_ball_moving_inward_keeps_heading() {
        let arena = arena();
        let mut ball = ball_at(arena.center + Vec2::new(SIZE - RADIUS + 2.0, 0.0), Vec2::new(-3.0, 1.0));
        CircleBoundary.reflect(&mut ball, &arena);
        assert_eq!(ball.vel, Vec2::new(-3.0, 1.0));
        assert!(!CircleBoundary.check_collision(&ball, &arena));
    }

    #[test]
    fn test_square_corner_flips_both_axes() {
        let arena = arena();
        let corner = arena.center - Vec2::splat(SIZE);
        let mut ball = ball_at(corner + Vec2::splat(RADIUS - 2.0), Vec2::new(-4.0, -6.0));
        assert!(SquareBoundary.check_collision(&ball, &arena));

        SquareBoundary.reflect(&mut ball, &arena);
        assert_eq!(ball.vel, Vec2::new(4.0, 6.0));
        assert!(!SquareBoundary.check_collision(&ball, &arena));
    }

    #[test]
    fn test_square_single_edge() {
        let arena = arena();
        let right = arena.center.x + SIZE;
        let mut ball = ball_at(Vec2::new(right - RADIUS + 1.0, arena.center.y), Vec2::new(5.0, 2.0));
        SquareBoundary.reflect(&mut ball, &arena);
        assert_eq!(ball.vel, Vec2::new(-5.0, 2.0));
        assert!(ball.pos.x + RADIUS < right);
    }

    #[test]
    fn test_triangle_vertices() {
        let arena = arena();
        let v = TRIANGLE.vertices(&arena);
        let c = arena.center;
        let h = SIZE * 3f32.sqrt() / 2.0;
        assert!((v[0] - (c + Vec2::new(0.0, -SIZE))).length() < 1e-3);
        assert!((v[1] - (c + Vec2::new(-h, SIZE / 2.0))).length() < 1e-3);
        assert!((v[2] - (c + Vec2::new(h, SIZE / 2.0))).length() < 1e-3);
    }

    #[test]
    fn test_hexagon_vertices() {
        let arena = arena();
        let v = HEXAGON.vertices(&arena);
        assert_eq!(v.len(), 6);
        assert!((v[0] - (arena.center + Vec2::new(SIZE, 0.0))).length() < 1e-3);
        assert!((v[3] - (arena.center + Vec2::new(-SIZE, 0.0))).length() < 1e-3);
    }

    #[test]
    fn test_triangle_bottom_edge_bounce() {
        let arena = arena();
        // Bottom edge is at y = center.y + size / 2
        let bottom = arena.center.y + SIZE / 2.0;
        let mut ball = ball_at(Vec2::new(arena.center.x, bottom - RADIUS + 3.0), Vec2::new(1.0, 4.0));
        assert!(TRIANGLE.check_collision(&ball, &arena));

        TRIANGLE.reflect(&mut ball, &arena);
        assert!((ball.vel - Vec2::new(1.0, -4.0)).length() < 1e-4);
        assert!(!TRIANGLE.check_collision(&ball, &arena));
    }

    #[test]
    fn test_triangle_corner_tie_uses_first_edge() {
        let arena = arena();
        let v = TRIANGLE.vertices(&arena);
        // Straight out past the bottom-left corner: edge 0 (left side) and
        // edge 1 (bottom) are equally near
        let mut ball = ball_at(arena.center + (v[1] - arena.center) * 1.1, Vec2::new(-1.0, 0.0));
        assert!(TRIANGLE.check_collision(&ball, &arena));

        TRIANGLE.reflect(&mut ball, &arena);
        // The left side's inward normal is (cos 30, sin 30); the bottom's
        // (0, -1) would have left a horizontal heading untouched
        let half_sqrt3 = 3f32.sqrt() / 2.0;
        assert!((ball.vel - Vec2::new(0.5, half_sqrt3)).length() < 1e-4, "{:?}", ball.vel);
        assert!(!TRIANGLE.check_collision(&ball, &arena));
    }

    #[test]
    fn test_contain_keeps_velocity() {
        let arena = arena();
        for kind in ShapeKind::ALL {
            let boundary = kind.boundary();
            let mut ball = ball_at(arena.center + Vec2::new(SIZE * 1.2, 15.0), Vec2::new(4.0, -2.0));
            assert!(boundary.check_collision(&ball, &arena));

            boundary.contain(&mut ball, &arena);
            assert_eq!(ball.vel, Vec2::new(4.0, -2.0));
            assert!(!boundary.check_collision(&ball, &arena), "{:?}", kind);
        }
    }

    #[test]
    fn test_hexagon_overshoot_is_pulled_back() {
        let arena = arena();
        // Well outside the right side, as a very fast ball would land
        let mut ball = ball_at(arena.center + Vec2::new(SIZE * 1.5, 10.0), Vec2::new(50.0, 5.0));
        assert!(HEXAGON.check_collision(&ball, &arena));

        HEXAGON.reflect(&mut ball, &arena);
        assert!(ball.vel.x < 0.0);
        assert!(!HEXAGON.check_collision(&ball, &arena));
    }

    #[test]
    fn test_inset_vertices_keep_clearance() {
        let arena = arena();
        for polygon in [&TRIANGLE, &HEXAGON] {
            let inset = polygon.inset_vertices(&arena, RADIUS);
            let outer = polygon.vertices(&arena);
            let n = outer.len();
            for p in &inset {
                let nearest = (0..n)
                    .map(|i| distance_to_segment(*p, outer[i], outer[(i + 1) % n]))
                    .fold(f32::MAX, f32::min);
                assert!((nearest - RADIUS).abs() < 1e-2, "clearance {}", nearest);
            }
        }
    }

    #[test]
    fn test_draw_commands() {
        let arena = arena();
        let mut frame = Frame::new(Vec2::new(600.0, 400.0));

        ShapeKind::Circle.boundary().draw(&mut frame, &arena);
        ShapeKind::Square.boundary().draw(&mut frame, &arena);
        ShapeKind::Hexagon.boundary().draw(&mut frame, &arena);

        let commands = frame.commands();
        assert!(matches!(&commands[0], DrawCommand::StrokeArc { radius, .. } if *radius == SIZE));
        assert!(matches!(&commands[1], DrawCommand::StrokePath { points, closed: true, .. } if points.len() == 4));
        assert!(matches!(&commands[2], DrawCommand::StrokePath { points, closed: true, .. } if points.len() == 6));
    }
}
