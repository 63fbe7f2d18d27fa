//! Colored vertex records and color helpers

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::geometry::{to_f32_array, Point3};

/// RGBA color, each channel in `0.0..=1.0`
pub type Rgba = [f32; 4];

/// RGB color without alpha
pub type Rgb = [f32; 3];

/// Combine an RGB triple with an alpha value
pub fn with_alpha(rgb: Rgb, alpha: f32) -> Rgba {
    [rgb[0], rgb[1], rgb[2], alpha]
}

/// One vertex as laid out in a GPU vertex buffer.
///
/// `#[repr(C)]` with position first: stride is 28 bytes and the color starts
/// at byte 12.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: Rgba,
}

impl ColoredVertex {
    /// Size in bytes of one vertex record
    pub const STRIDE: usize = std::mem::size_of::<ColoredVertex>();

    /// Byte offset of the color attribute within a record
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 3]>();

    pub fn new(position: Point3, color: Rgba) -> Self {
        Self {
            position: to_f32_array(position),
            color,
        }
    }

    pub fn from_f32(position: [f32; 3], color: Rgba) -> Self {
        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(ColoredVertex::STRIDE, 28);
        assert_eq!(ColoredVertex::COLOR_OFFSET, 12);

        let v = ColoredVertex::new(Point3::new(1.0, 2.0, 3.0), [0.5, 0.25, 1.0, 1.0]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        let color: &[f32] = bytemuck::cast_slice(&bytes[ColoredVertex::COLOR_OFFSET..]);
        assert_eq!(color, &[0.5, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha([0.7, 0.7, 1.0], 0.3), [0.7, 0.7, 1.0, 0.3]);
    }
}
