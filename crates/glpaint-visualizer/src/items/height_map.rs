//! Height map surface drawn as one serpentine triangle strip

use glpaint_core::{ColoredVertex, Point3, Result, Rgba, SceneError};

use super::{Drawable, Primitive};

pub const DEFAULT_HEIGHT_MAP_COLOR: Rgba = [1.0, 1.0, 1.0, 0.2];

/// Grid of `nodes_x * nodes_y` vertices, row by row.
///
/// The shader receives the z range as `height_min` and `height_max`.
#[derive(Debug, Clone)]
pub struct HeightMap {
    nodes_x: usize,
    nodes_y: usize,
    vertices: Vec<ColoredVertex>,
    indices: Vec<u32>,
    height_min: f32,
    height_max: f32,
}

impl HeightMap {
    pub fn new(
        label: &str,
        nodes_x: usize,
        nodes_y: usize,
        vertices: Vec<ColoredVertex>,
    ) -> Result<Self> {
        if nodes_x < 2 || nodes_y < 2 {
            return Err(SceneError::InvalidItem {
                label: label.to_string(),
                reason: format!("height map needs at least 2x2 nodes, got {}x{}", nodes_x, nodes_y),
            }
            .into());
        }
        if vertices.len() != nodes_x * nodes_y {
            return Err(SceneError::InvalidItem {
                label: label.to_string(),
                reason: format!(
                    "expected {} vertices for {}x{} nodes, got {}",
                    nodes_x * nodes_y,
                    nodes_x,
                    nodes_y,
                    vertices.len()
                ),
            }
            .into());
        }

        let (height_min, height_max) = vertices.iter().map(|v| v.position[2]).fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), z| (lo.min(z), hi.max(z)),
        );

        Ok(Self {
            nodes_x,
            nodes_y,
            indices: strip_indices(nodes_x, nodes_y),
            vertices,
            height_min,
            height_max,
        })
    }

    /// Regular grid with `spacing` between nodes and one height per node
    pub fn from_heights(
        label: &str,
        nodes_x: usize,
        nodes_y: usize,
        spacing: f64,
        heights: &[f64],
        color: Rgba,
    ) -> Result<Self> {
        let vertices = heights
            .iter()
            .enumerate()
            .map(|(i, &z)| {
                let x = (i % nodes_x.max(1)) as f64 * spacing;
                let y = (i / nodes_x.max(1)) as f64 * spacing;
                ColoredVertex::new(Point3::new(x, y, z), color)
            })
            .collect();
        Self::new(label, nodes_x, nodes_y, vertices)
    }

    pub fn nodes(&self) -> (usize, usize) {
        (self.nodes_x, self.nodes_y)
    }

    pub fn height_range(&self) -> (f32, f32) {
        (self.height_min, self.height_max)
    }
}

/// Index buffer walking rows alternately right and left, joined by
/// degenerate triangles.
///
/// Length is `1 + 2(nx-1)(ny-1) + 2(ny-1)`; the first index is 0.
pub fn strip_indices(nodes_x: usize, nodes_y: usize) -> Vec<u32> {
    let nx = nodes_x as u32;
    let ny = nodes_y as u32;
    let size = 1 + 2 * (nodes_x - 1) * (nodes_y - 1) + 2 * (nodes_y - 1);

    let mut indices = Vec::with_capacity(size);
    indices.push(0);

    let mut rightward = true;
    for y in 0..ny - 1 {
        if rightward {
            for x in 0..nx - 1 {
                indices.push((y + 1) * nx + x);
                indices.push(y * nx + x + 1);
            }
            indices.push((y + 2) * nx - 1);
            indices.push((y + 2) * nx - 1);
        } else {
            for x in (1..nx).rev() {
                indices.push((y + 1) * nx + x);
                indices.push(y * nx + x - 1);
            }
            indices.push((y + 1) * nx);
            indices.push((y + 1) * nx);
        }
        rightward = !rightward;
    }

    indices
}

impl Drawable for HeightMap {
    fn primitive(&self) -> Primitive {
        Primitive::TriangleStrip
    }

    fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }

    fn indices(&self) -> Option<&[u32]> {
        Some(&self.indices)
    }

    fn uniforms(&self) -> Vec<(&'static str, f32)> {
        vec![("height_min", self.height_min), ("height_max", self.height_max)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_indices_3x3() {
        assert_eq!(
            strip_indices(3, 3),
            vec![0, 3, 1, 4, 2, 5, 5, 8, 4, 7, 3, 6, 6]
        );
    }

    #[test]
    fn test_strip_index_count() {
        for (nx, ny) in [(2, 2), (4, 3), (10, 7)] {
            let indices = strip_indices(nx, ny);
            assert_eq!(indices.len(), 1 + 2 * (nx - 1) * (ny - 1) + 2 * (ny - 1));
            assert!(indices.iter().all(|&i| (i as usize) < nx * ny));
        }
    }

    #[test]
    fn test_height_range_uniforms() {
        let map = HeightMap::from_heights(
            "hm",
            2,
            2,
            1.0,
            &[0.0, -1.5, 2.0, 0.5],
            DEFAULT_HEIGHT_MAP_COLOR,
        )
        .expect("valid height map");
        assert_eq!(map.height_range(), (-1.5, 2.0));
        assert_eq!(
            map.uniforms(),
            vec![("height_min", -1.5), ("height_max", 2.0)]
        );
        assert_eq!(map.vertices()[3].position, [1.0, 1.0, 0.5]);
        assert_eq!(map.primitive(), Primitive::TriangleStrip);
    }

    #[test]
    fn test_rejects_mismatched_vertex_count() {
        let err = HeightMap::from_heights("hm", 3, 3, 1.0, &[0.0; 4], DEFAULT_HEIGHT_MAP_COLOR)
            .expect_err("wrong count");
        assert!(err.to_string().contains("expected 9 vertices"));
        assert!(HeightMap::new("hm", 1, 5, Vec::new()).is_err());
    }
}
