//! Machine-level data: motion modes and work coordinate systems

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::Point3;

/// Motion mode (G00=rapid, G01=linear, G02=arc_cw, G03=arc_ccw)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionMode {
    Rapid = 0,
    Linear = 1,
    ArcCw = 2,
    ArcCcw = 3,
}

impl MotionMode {
    /// Motion mode for a G-code number
    pub fn from_gcode(code: u32) -> Option<Self> {
        match code {
            0 => Some(MotionMode::Rapid),
            1 => Some(MotionMode::Linear),
            2 => Some(MotionMode::ArcCw),
            3 => Some(MotionMode::ArcCcw),
            _ => None,
        }
    }

    pub fn is_arc(self) -> bool {
        matches!(self, MotionMode::ArcCw | MotionMode::ArcCcw)
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            MotionMode::Rapid => "Rapid positioning (G00)",
            MotionMode::Linear => "Linear interpolation (G01)",
            MotionMode::ArcCw => "Clockwise arc (G02)",
            MotionMode::ArcCcw => "Counter-clockwise arc (G03)",
        }
    }
}

/// Rotational sense of an arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl ArcDirection {
    pub fn is_clockwise(self) -> bool {
        self == ArcDirection::Clockwise
    }

    /// Motion mode drawing an arc in this direction
    pub fn motion_mode(self) -> MotionMode {
        match self {
            ArcDirection::Clockwise => MotionMode::ArcCw,
            ArcDirection::CounterClockwise => MotionMode::ArcCcw,
        }
    }
}

/// Work coordinate system - Group 12 (G54-G59)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    #[default]
    G54,
    G55,
    G56,
    G57,
    G58,
    G59,
}

impl CoordinateSystem {
    pub const ALL: [CoordinateSystem; 6] = [
        CoordinateSystem::G54,
        CoordinateSystem::G55,
        CoordinateSystem::G56,
        CoordinateSystem::G57,
        CoordinateSystem::G58,
        CoordinateSystem::G59,
    ];

    /// Coordinate system for a G-code number (54..=59)
    pub fn from_gcode(code: u32) -> Option<Self> {
        match code {
            54 => Some(CoordinateSystem::G54),
            55 => Some(CoordinateSystem::G55),
            56 => Some(CoordinateSystem::G56),
            57 => Some(CoordinateSystem::G57),
            58 => Some(CoordinateSystem::G58),
            59 => Some(CoordinateSystem::G59),
            _ => None,
        }
    }

    pub fn gcode(self) -> u32 {
        match self {
            CoordinateSystem::G54 => 54,
            CoordinateSystem::G55 => 55,
            CoordinateSystem::G56 => 56,
            CoordinateSystem::G57 => 57,
            CoordinateSystem::G58 => 58,
            CoordinateSystem::G59 => 59,
        }
    }
}

impl std::fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "G{}", self.gcode())
    }
}

impl std::str::FromStr for CoordinateSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .trim()
            .trim_start_matches(['G', 'g'])
            .parse::<u32>()
            .map_err(|_| format!("Invalid coordinate system: {}", s))?;
        Self::from_gcode(code).ok_or_else(|| format!("Invalid coordinate system: {}", s))
    }
}

/// Offsets of the work coordinate systems relative to machine zero.
///
/// Systems without an entry have a zero offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateOffsets {
    offsets: HashMap<CoordinateSystem, Point3>,
}

impl CoordinateOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style offset assignment
    pub fn with_offset(mut self, system: CoordinateSystem, offset: Point3) -> Self {
        self.offsets.insert(system, offset);
        self
    }

    pub fn set(&mut self, system: CoordinateSystem, offset: Point3) {
        self.offsets.insert(system, offset);
    }

    pub fn offset(&self, system: CoordinateSystem) -> Point3 {
        self.offsets.get(&system).copied().unwrap_or(Point3::ZERO)
    }

    /// Machine coordinates of a work-coordinate point
    pub fn to_machine(&self, system: CoordinateSystem, work: Point3) -> Point3 {
        work + self.offset(system)
    }

    /// Work coordinates of a machine-coordinate point
    pub fn to_work(&self, system: CoordinateSystem, machine: Point3) -> Point3 {
        machine - self.offset(system)
    }
}
