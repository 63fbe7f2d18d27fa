//! XYZ axis cross: X red, Y green, Z blue, unit length

use glpaint_core::{ColoredVertex, Rgba};

use super::{Drawable, Primitive};

const X_COLOR: Rgba = [0.6, 0.0, 0.0, 1.0];
const Y_COLOR: Rgba = [0.0, 0.6, 0.0, 1.0];
const Z_COLOR: Rgba = [0.0, 0.0, 0.6, 1.0];

#[derive(Debug, Clone)]
pub struct CoordSystemItem {
    vertices: [ColoredVertex; 6],
    highlighted: bool,
}

impl Default for CoordSystemItem {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordSystemItem {
    pub fn new() -> Self {
        let v = ColoredVertex::from_f32;
        Self {
            vertices: [
                v([0.0, 0.0, 0.0], X_COLOR),
                v([1.0, 0.0, 0.0], X_COLOR),
                v([0.0, 0.0, 0.0], Y_COLOR),
                v([0.0, 1.0, 0.0], Y_COLOR),
                v([0.0, 0.0, 0.0], Z_COLOR),
                v([0.0, 0.0, 1.0], Z_COLOR),
            ],
            highlighted: false,
        }
    }

    /// Fade the axes toward white at the origin, or toward black when
    /// `on` is false
    pub fn highlight(&mut self, on: bool) {
        let color = if on {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            [0.0, 0.0, 0.0, 1.0]
        };
        for axis in 0..3 {
            self.vertices[axis * 2].color = color;
        }
        self.highlighted = on;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

impl Drawable for CoordSystemItem {
    fn primitive(&self) -> Primitive {
        Primitive::Lines
    }

    fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_recolors_origin_vertices() {
        let mut cs = CoordSystemItem::new();
        assert_eq!(cs.vertex_count(), 6);
        assert_eq!(cs.vertices()[2].color, Y_COLOR);

        cs.highlight(true);
        assert!(cs.is_highlighted());
        for (i, v) in cs.vertices().iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(v.color, [1.0, 1.0, 1.0, 1.0]);
            } else {
                assert_ne!(v.color, [1.0, 1.0, 1.0, 1.0]);
            }
        }

        cs.highlight(false);
        assert_eq!(cs.vertices()[4].color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(cs.vertices()[5].color, Z_COLOR);
    }
}
