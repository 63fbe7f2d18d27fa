//! Drawable items
//!
//! Each item owns its CPU vertex data and describes how the rendering layer
//! should draw it. Creating GPU resources, binding shaders and issuing draw
//! calls is the rendering layer's job.

pub mod arc;
pub mod coord_system;
pub mod gcode_path;
pub mod grid;
pub mod height_map;
pub mod star;
pub mod transform;

pub use arc::{ArcItem, ArcParams, CircleItem};
pub use coord_system::CoordSystemItem;
pub use gcode_path::GcodePath;
pub use grid::OrthoLineGrid;
pub use height_map::HeightMap;
pub use star::StarItem;
pub use transform::{Billboard, Transform};

use glpaint_core::ColoredVertex;
use serde::Serialize;

/// How consecutive vertices are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Primitive {
    Lines,
    LineStrip,
    TriangleFan,
    TriangleStrip,
}

/// Geometry handed to the rendering layer
pub trait Drawable {
    fn primitive(&self) -> Primitive;

    fn vertices(&self) -> &[ColoredVertex];

    /// Element indices; `None` draws the vertices in order
    fn indices(&self) -> Option<&[u32]> {
        None
    }

    /// Extra shader uniforms
    fn uniforms(&self) -> Vec<(&'static str, f32)> {
        Vec::new()
    }

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }
}
