//! Flat grid of axis-parallel lines

use glpaint_core::{ColoredVertex, Point3, Result, Rgba, SceneError};

use super::{Drawable, Primitive};
use crate::buffer::VertexBuffer;

pub const DEFAULT_GRID_COLOR: Rgba = [1.0, 1.0, 1.0, 0.2];

/// Lines every `unit` across a rectangle in the local XY plane.
///
/// Lines start at the local origin and span the rectangle's width and
/// height.
#[derive(Debug, Clone)]
pub struct OrthoLineGrid {
    buffer: VertexBuffer,
    columns: usize,
    rows: usize,
}

impl OrthoLineGrid {
    pub fn new(
        label: impl Into<String>,
        lower_left: [f64; 2],
        upper_right: [f64; 2],
        unit: f64,
        color: Rgba,
    ) -> Result<Self> {
        let label = label.into();
        let width = upper_right[0] - lower_left[0];
        let height = upper_right[1] - lower_left[1];

        if !(unit.is_finite() && unit > 0.0) {
            return Err(invalid(&label, format!("grid unit must be positive, got {}", unit)).into());
        }
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(invalid(
                &label,
                format!("upper right corner lies below or left of lower left ({} x {})", width, height),
            )
            .into());
        }

        let columns = (width / unit) as usize + 1;
        let rows = (height / unit) as usize + 1;
        let mut buffer = VertexBuffer::new(label, 2 * columns + 2 * rows);

        for column in 0..columns {
            let x = unit * column as f64;
            buffer.push(Point3::new(x, 0.0, 0.0), color)?;
            buffer.push(Point3::new(x, height, 0.0), color)?;
        }
        for row in 0..rows {
            let y = unit * row as f64;
            buffer.push(Point3::new(0.0, y, 0.0), color)?;
            buffer.push(Point3::new(width, y, 0.0), color)?;
        }

        Ok(Self {
            buffer,
            columns,
            rows,
        })
    }

    /// Number of lines parallel to Y
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of lines parallel to X
    pub fn rows(&self) -> usize {
        self.rows
    }
}

fn invalid(label: &str, reason: String) -> SceneError {
    SceneError::InvalidItem {
        label: label.to_string(),
        reason,
    }
}

impl Drawable for OrthoLineGrid {
    fn primitive(&self) -> Primitive {
        Primitive::Lines
    }

    fn vertices(&self) -> &[ColoredVertex] {
        self.buffer.vertices()
    }
}
