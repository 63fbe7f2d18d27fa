//! # glpaint Core
//!
//! Core types and utilities for glpaint.
//! Provides the geometry value types, colored vertex records, machine-level
//! data (motion modes, work coordinate systems) and the error taxonomy used
//! by every other crate.

pub mod constants;
pub mod data;
pub mod error;
pub mod geometry;
pub mod vertex;

pub use data::{ArcDirection, CoordinateOffsets, CoordinateSystem, MotionMode};

pub use error::{
    ArcEndpoint, BufferError, Error, GcodeError, GeometryError, Result, SceneError,
};

pub use geometry::{to_f32_array, Axis, AxisWords, Plane, PlaneAxes, Point3};

pub use vertex::{with_alpha, ColoredVertex, Rgb, Rgba};
