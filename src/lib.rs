//! # glpaint
//!
//! Vertex generation for CNC visualization. Turns arcs, grids, height maps
//! and G-code toolpaths into colored vertex buffers ready for line drawing.
//!
//! ## Architecture
//!
//! glpaint is organized as a workspace with multiple crates:
//!
//! 1. **glpaint-core** - Geometry types, colored vertices, machine data, errors
//! 2. **glpaint-settings** - Render configuration and its persistence
//! 3. **glpaint-visualizer** - Arc fractionizer, G-code replay, items, scene
//! 4. **glpaint** - This facade and the `glpaint` command line tool

pub mod cli;

pub use glpaint_core::{
    ArcDirection, AxisWords, ColoredVertex, CoordinateOffsets, CoordinateSystem, Error,
    MotionMode, Plane, Point3, Result, Rgba,
};

pub use glpaint_settings::{default_config_path, ArcValidation, RenderConfig};

pub use glpaint_visualizer::{
    ArcFractionizer, ArcSpec, Drawable, GcodeInterpreter, GcodePath, GpuBuffer, HostBuffer,
    ItemId, ItemSpec, MotionReplay, PathCommand, ReplayStart, Scene,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so that stdout stays free for command output.
/// `RUST_LOG` adds directives on top of the INFO default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
