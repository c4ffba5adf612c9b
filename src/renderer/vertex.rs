//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [30.0 / 255.0, 60.0 / 255.0, 114.0 / 255.0, 1.0];
    pub const OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const BALL_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Convert HSL (hue in degrees, saturation/lightness 0..1) to RGBA
    pub fn hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        [r + m, g + m, b + m, alpha]
    }

    /// Fully saturated mid-lightness color for a hue, as the ball and particles use
    pub fn hue(hue: u16, alpha: f32) -> [f32; 4] {
        hsl(hue as f32, 1.0, 0.5, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_hue_primaries() {
        assert!(close(hue(0, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hue(120, 1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hue(240, 0.5), [0.0, 0.0, 1.0, 0.5]));
    }

    #[test]
    fn test_hue_secondary() {
        // 30 degrees is orange
        assert!(close(hue(30, 1.0), [1.0, 0.5, 0.0, 1.0]));
    }
}
