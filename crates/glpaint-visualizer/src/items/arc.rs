//! Arcs and circles in the XY plane

use glpaint_core::{ColoredVertex, Point3, Result, Rgba};
use serde::{Deserialize, Serialize};

use super::{Drawable, Primitive};
use crate::arc::{ArcFractionizer, ArcSpec};
use crate::buffer::VertexBuffer;

/// Parameters of an [`ArcItem`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcParams {
    /// Start in local coordinates
    pub start: Point3,
    /// End in local coordinates; equal to `start` for a full circle
    pub end: Point3,
    /// Offset of the center from `start`
    pub offset: Point3,
    /// Only sizes the segments; the arc itself is given by start, end and
    /// offset
    pub radius: f64,
    pub clockwise: bool,
    /// Draw a fillable wedge instead of a line
    pub use_triangles: bool,
    pub color: Rgba,
}

impl ArcParams {
    pub fn spec(&self) -> ArcSpec {
        ArcSpec::new(self.start, self.end, self.offset, self.radius, self.clockwise)
    }
}

/// Arc approximated by line segments, optionally as a triangle fan
#[derive(Debug, Clone)]
pub struct ArcItem {
    buffer: VertexBuffer,
    primitive: Primitive,
}

impl ArcItem {
    pub fn new(
        label: impl Into<String>,
        params: &ArcParams,
        fractionizer: &ArcFractionizer,
    ) -> Result<Self> {
        let path = fractionizer.fractionize_checked(&params.spec())?;

        let mut buffer = VertexBuffer::new(label, path.len() + 1);
        let primitive = if params.use_triangles {
            buffer.push(params.start + params.offset, params.color)?;
            Primitive::TriangleFan
        } else {
            Primitive::LineStrip
        };
        for p in path.iter() {
            buffer.push(*p, params.color)?;
        }

        Ok(Self { buffer, primitive })
    }

    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }
}

impl Drawable for ArcItem {
    fn primitive(&self) -> Primitive {
        self.primitive
    }

    fn vertices(&self) -> &[ColoredVertex] {
        self.buffer.vertices()
    }
}

/// Full circle around the local origin
#[derive(Debug, Clone)]
pub struct CircleItem {
    arc: ArcItem,
    radius: f64,
}

impl CircleItem {
    pub fn new(
        label: impl Into<String>,
        radius: f64,
        use_triangles: bool,
        color: Rgba,
        fractionizer: &ArcFractionizer,
    ) -> Result<Self> {
        let start = Point3::new(-radius, 0.0, 0.0);
        let params = ArcParams {
            start,
            end: start,
            offset: Point3::new(radius, 0.0, 0.0),
            radius,
            clockwise: true,
            use_triangles,
            color,
        };
        Ok(Self {
            arc: ArcItem::new(label, &params, fractionizer)?,
            radius,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Drawable for CircleItem {
    fn primitive(&self) -> Primitive {
        self.arc.primitive()
    }

    fn vertices(&self) -> &[ColoredVertex] {
        self.arc.vertices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glpaint_settings::ArcValidation;

    const PINK: Rgba = [1.0, 0.5, 1.0, 1.0];

    #[test]
    fn test_circle_closes() {
        let circle = CircleItem::new("c", 1.0, false, PINK, &ArcFractionizer::default())
            .expect("valid circle");
        let vertices = circle.vertices();
        assert_eq!(circle.primitive(), Primitive::LineStrip);
        assert_eq!(vertices.len(), 36);
        assert_eq!(vertices[0].position, [-1.0, 0.0, 0.0]);
        assert_eq!(vertices[35].position, [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_triangle_fan_starts_at_center() {
        let params = ArcParams {
            start: Point3::new(0.0, 10.0, 0.0),
            end: Point3::new(10.0, 0.0, 0.0),
            offset: Point3::new(0.0, -10.0, 0.0),
            radius: 10.0,
            clockwise: true,
            use_triangles: true,
            color: PINK,
        };
        let item = ArcItem::new("wedge", &params, &ArcFractionizer::default())
            .expect("valid arc");
        assert_eq!(item.primitive(), Primitive::TriangleFan);
        assert_eq!(item.vertices()[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(item.vertex_count(), 29);
        assert_eq!(item.buffer().capacity(), 29);
    }

    #[test]
    fn test_strict_validation_rejects_bad_arc() {
        let params = ArcParams {
            start: Point3::ZERO,
            end: Point3::new(5.0, 0.0, 0.0),
            offset: Point3::new(1.0, 0.0, 0.0),
            radius: 1.0,
            clockwise: false,
            use_triangles: false,
            color: PINK,
        };
        let strict = ArcFractionizer::default().with_validation(ArcValidation::Strict);
        let err = ArcItem::new("bad", &params, &strict).expect_err("inconsistent arc");
        assert!(err.is_geometry_error());
        assert!(ArcItem::new("bad", &params, &ArcFractionizer::default()).is_ok());
    }
}
