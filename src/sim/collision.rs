//! Collision geometry shared by the shape boundaries
//!
//! Point-to-segment distances, edge normals, reflection, and the projection
//! that keeps the ball inside a convex polygon once it has bounced.

use glam::Vec2;

/// Closest point on segment `a`-`b` to `p`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 0.0001 {
        return a; // Degenerate segment
    }

    let t = ((p - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Distance from `p` to segment `a`-`b`
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}

/// Unit normal of edge `a`-`b` pointing toward `inside`
pub fn inward_normal(a: Vec2, b: Vec2, inside: Vec2) -> Vec2 {
    let edge = b - a;
    let normal = Vec2::new(-edge.y, edge.x).normalize_or_zero();
    if normal.dot(inside - a) < 0.0 {
        -normal
    } else {
        normal
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Distances closer than this count as a tie
pub const EDGE_TIE_EPSILON: f32 = 1e-3;

/// Index of the edge nearest to `p`, with its distance.
///
/// Edges are `(vertices[i], vertices[i + 1])` wrapping at the end. Ties
/// (within [`EDGE_TIE_EPSILON`]) keep the lowest index, so a ball past a
/// shared corner resolves the same way whatever the rounding.
pub fn nearest_edge(p: Vec2, vertices: &[Vec2]) -> Option<(usize, f32)> {
    let n = vertices.len();
    let mut best: Option<(usize, f32)> = None;
    for i in 0..n {
        let dist = distance_to_segment(p, vertices[i], vertices[(i + 1) % n]);
        match best {
            Some((_, best_dist)) if dist > best_dist - EDGE_TIE_EPSILON => {}
            _ => best = Some((i, dist)),
        }
    }
    best
}

/// Whether `p` lies inside the convex polygon (boundary counts as inside)
pub fn convex_contains(p: Vec2, vertices: &[Vec2], centroid: Vec2) -> bool {
    let n = vertices.len();
    (0..n).all(|i| {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        inward_normal(a, b, centroid).dot(p - a) >= 0.0
    })
}

/// Move `p` onto the convex polygon if it lies outside; points inside are returned as-is
pub fn clamp_into_convex(p: Vec2, vertices: &[Vec2], centroid: Vec2) -> Vec2 {
    if convex_contains(p, vertices, centroid) {
        return p;
    }
    let n = vertices.len();
    (0..n)
        .map(|i| closest_point_on_segment(p, vertices[i], vertices[(i + 1) % n]))
        .min_by(|a, b| {
            a.distance_squared(p)
                .partial_cmp(&b.distance_squared(p))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(centroid)
}
