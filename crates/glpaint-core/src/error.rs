//! Error handling for glpaint
//!
//! Provides error types for every layer of the library:
//! - Geometry errors (malformed arcs)
//! - Buffer errors (vertex capacity management)
//! - G-Code errors (interpreting program text)
//! - Scene errors (item registry)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Which end of an arc failed a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcEndpoint {
    /// The start point of the arc
    Start,
    /// The target point of the arc
    Target,
}

impl std::fmt::Display for ArcEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Geometry error type
///
/// Raised when arc parameters do not describe a drawable circular arc.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Radius is zero, negative, or not finite
    #[error("Arc radius must be positive and finite, got {radius}")]
    NonPositiveRadius {
        /// The offending radius.
        radius: f64,
    },

    /// Start/target/offset do not describe a circle of the given radius
    #[error("Arc {which} point lies {distance:.4} from center, expected radius {radius:.4}")]
    InconsistentArc {
        /// The endpoint that is off the circle.
        which: ArcEndpoint,
        /// Measured in-plane distance from the arc center.
        distance: f64,
        /// The radius the caller supplied.
        radius: f64,
    },

    /// The arc would need more chords than the configured limit
    #[error("Arc needs {segments} segments, limit is {max}")]
    TooManySegments {
        /// Segments needed to stay within the tolerance.
        segments: usize,
        /// The configured limit.
        max: usize,
    },

    /// An R-word arc whose start and target coincide
    #[error("Radius-format arc needs distinct start and target points")]
    ZeroLengthChord,

    /// An R-word arc whose radius cannot span the chord
    #[error("Arc radius {radius:.4} too small for chord length {chord:.4}")]
    RadiusTooSmall {
        /// The requested radius.
        radius: f64,
        /// Distance between start and target in the arc plane.
        chord: f64,
    },
}

/// Vertex buffer error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Appending would exceed the reserved vertex count
    #[error("Item '{label}': cannot append more than the maximum of {capacity} vertices")]
    CapacityExceeded {
        /// Label of the item owning the buffer.
        label: String,
        /// The configured maximum vertex count.
        capacity: usize,
    },

    /// Capacity can only grow
    #[error("Item '{label}': cannot shrink capacity from {capacity} to {requested}")]
    ShrinkNotSupported {
        /// Label of the item owning the buffer.
        label: String,
        /// Current maximum vertex count.
        capacity: usize,
        /// The requested (smaller) maximum.
        requested: usize,
    },

    /// Index does not address an emitted vertex
    #[error("Item '{label}': vertex {index} out of range (count {count})")]
    IndexOutOfRange {
        /// Label of the item owning the buffer.
        label: String,
        /// Requested vertex index.
        index: usize,
        /// Number of emitted vertices.
        count: usize,
    },
}

/// G-Code error type
///
/// Represents errors found while interpreting G-Code program text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Invalid G-Code syntax
    #[error("Invalid syntax at line {line_number}: {reason}")]
    InvalidSyntax {
        /// The line number where the syntax error occurred.
        line_number: usize,
        /// The reason for the syntax error.
        reason: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' at line {line_number}: {reason}")]
    InvalidParameter {
        /// The line number where the invalid parameter was found.
        line_number: usize,
        /// The parameter name.
        param: String,
        /// The reason the parameter is invalid.
        reason: String,
    },

    /// Missing required parameter
    #[error("Missing required parameter '{param}' at line {line_number}")]
    MissingParameter {
        /// The line number where the parameter was missing.
        line_number: usize,
        /// The name of the missing parameter.
        param: String,
    },
}

/// Scene registry error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Item parameters cannot produce geometry
    #[error("Invalid item '{label}': {reason}")]
    InvalidItem {
        /// Label of the item being created.
        label: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Label pattern failed to compile
    #[error("Invalid label pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

/// Main error type for glpaint
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Buffer error
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a buffer error
    pub fn is_buffer_error(&self) -> bool {
        matches!(self, Error::Buffer(_))
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
