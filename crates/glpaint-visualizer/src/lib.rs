//! # glpaint Visualizer
//!
//! Geometry and vertex generation for glpaint.
//! Includes the arc fractionizer, the G-code interpreter and motion replay,
//! vertex buffers, drawable items and the scene registry.

pub mod arc;
pub mod buffer;
pub mod gcode;
pub mod highlight;
pub mod items;
pub mod path;
pub mod scene;

pub use arc::{ArcFractionizer, ArcSpec, FractionizedPath};

pub use buffer::{GpuBuffer, HostBuffer, VertexBuffer};

pub use gcode::{ArcMarker, DistanceMode, GcodeInterpreter, PathCommand};

pub use highlight::{HighlightHandle, HighlightQueue};

pub use items::{
    ArcItem, ArcParams, Billboard, CircleItem, CoordSystemItem, Drawable, GcodePath, HeightMap,
    OrthoLineGrid, Primitive, StarItem, Transform,
};

pub use path::{Bounds, MachineState, MotionReplay, ReplayOutput, ReplayStart, ReplayState};

pub use scene::{GcodeSource, Item, ItemId, ItemSpec, Scene, SceneItem};
