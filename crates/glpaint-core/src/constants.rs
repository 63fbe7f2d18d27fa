//! Shared numeric constants

use crate::vertex::{Rgb, Rgba};

/// Maximum chord deviation when approximating arcs, in length units
pub const ARC_TOLERANCE: f64 = 0.004;

/// Angular travel below which a same-point arc is treated as a full circle
pub const ARC_ANGULAR_TRAVEL_EPSILON: f64 = 5e-7;

/// Upper bound on the chords of one arc; a 1 km radius full circle needs
/// about 35 000
pub const ARC_MAX_SEGMENTS: usize = 1_000_000;

/// Fraction of a move's displacement by which its leading vertex is pulled
/// toward the target, so consecutive segments do not share a vertex position
pub const APPROACH_FRACTION: f64 = 0.001;

/// Color substituted for highlighted toolpath lines
pub const HIGHLIGHT_COLOR: Rgba = [1.0, 0.5, 1.0, 1.0];

pub const RAPID_RGB: Rgb = [0.5, 0.5, 0.5];
pub const LINEAR_RGB: Rgb = [0.7, 0.7, 1.0];
pub const ARC_CW_RGB: Rgb = [0.8, 0.7, 1.0];
pub const ARC_CCW_RGB: Rgb = [0.7, 0.8, 1.0];
pub const UNKNOWN_RGB: Rgb = [0.0, 0.0, 0.0];

/// Spindle speed mapped to full white
pub const SPINDLE_SPEED_FULL_SCALE: f64 = 255.0;
