//! Three-dimensional cross that reads as a star from oblique angles

use glpaint_core::{ColoredVertex, Rgba};

use super::{Drawable, Primitive};

pub const DEFAULT_STAR_COLOR: Rgba = [1.0, 1.0, 0.5, 1.0];

#[derive(Debug, Clone)]
pub struct StarItem {
    vertices: [ColoredVertex; 6],
}

impl Default for StarItem {
    fn default() -> Self {
        Self::new(DEFAULT_STAR_COLOR)
    }
}

impl StarItem {
    pub fn new(color: Rgba) -> Self {
        let v = |p: [f32; 3]| ColoredVertex::from_f32(p, color);
        Self {
            vertices: [
                v([-0.5, 0.0, 0.0]),
                v([1.0, 0.0, 0.0]),
                v([0.0, -0.5, 0.0]),
                v([0.0, 0.5, 0.0]),
                v([0.0, 0.0, -0.5]),
                v([0.0, 0.0, 0.5]),
            ],
        }
    }
}

impl Drawable for StarItem {
    fn primitive(&self) -> Primitive {
        Primitive::Lines
    }

    fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }
}
