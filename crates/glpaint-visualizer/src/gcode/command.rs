//! Normalized motion commands consumed by the path replay

use glpaint_core::{ArcDirection, AxisWords, CoordinateSystem, MotionMode, Point3};
use serde::{Deserialize, Serialize};

/// Arc bracket inserted around the commands that draw one arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcMarker {
    /// Start of an arc; `synthetic` is set when the segments were produced
    /// by this library's fractionizer
    Begin {
        direction: ArcDirection,
        synthetic: bool,
    },
    End,
}

/// One logical command of a replay stream.
///
/// Targets are absolute work coordinates in the active coordinate system.
/// Axes left out keep the current machine coordinate. A command without
/// axis words does not move, but still draws a (zero length) segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathCommand {
    /// 1-based line of the program this command came from
    pub source_line: Option<usize>,
    /// Modal motion mode set by this command
    pub motion: Option<MotionMode>,
    pub target: AxisWords,
    /// Coordinate system selected before the move
    pub coordinate_system: Option<CoordinateSystem>,
    /// Modal spindle speed set by this command
    pub spindle_speed: Option<f64>,
    pub marker: Option<ArcMarker>,
}

impl PathCommand {
    /// Command that changes nothing
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn rapid(target: Point3) -> Self {
        Self::motion_to(MotionMode::Rapid, target)
    }

    pub fn linear(target: Point3) -> Self {
        Self::motion_to(MotionMode::Linear, target)
    }

    /// Unsplit arc; drawn as a single straight segment to its target
    pub fn arc(direction: ArcDirection, target: Point3) -> Self {
        Self::motion_to(direction.motion_mode(), target)
    }

    /// Move to `target` in the current modal motion mode
    pub fn move_to(target: Point3) -> Self {
        Self {
            target: AxisWords::full(target),
            ..Self::default()
        }
    }

    pub fn arc_begin(direction: ArcDirection, synthetic: bool) -> Self {
        Self {
            marker: Some(ArcMarker::Begin {
                direction,
                synthetic,
            }),
            ..Self::default()
        }
    }

    pub fn arc_end() -> Self {
        Self {
            marker: Some(ArcMarker::End),
            ..Self::default()
        }
    }

    pub fn select_coordinate_system(system: CoordinateSystem) -> Self {
        Self {
            coordinate_system: Some(system),
            ..Self::default()
        }
    }

    fn motion_to(mode: MotionMode, target: Point3) -> Self {
        Self {
            motion: Some(mode),
            target: AxisWords::full(target),
            ..Self::default()
        }
    }

    pub fn on_line(mut self, line_number: usize) -> Self {
        self.source_line = Some(line_number);
        self
    }

    pub fn with_motion(mut self, mode: MotionMode) -> Self {
        self.motion = Some(mode);
        self
    }

    pub fn with_target(mut self, target: AxisWords) -> Self {
        self.target = target;
        self
    }

    pub fn with_spindle_speed(mut self, speed: f64) -> Self {
        self.spindle_speed = Some(speed);
        self
    }

    pub fn with_coordinate_system(mut self, system: CoordinateSystem) -> Self {
        self.coordinate_system = Some(system);
        self
    }

    pub fn is_arc_begin(&self) -> bool {
        matches!(self.marker, Some(ArcMarker::Begin { .. }))
    }

    pub fn is_arc_end(&self) -> bool {
        matches!(self.marker, Some(ArcMarker::End))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let cmd = PathCommand::linear(Point3::new(1.0, 2.0, 3.0))
            .on_line(4)
            .with_spindle_speed(100.0);
        assert_eq!(cmd.motion, Some(MotionMode::Linear));
        assert_eq!(cmd.target.z, Some(3.0));
        assert_eq!(cmd.source_line, Some(4));
        assert_eq!(cmd.spindle_speed, Some(100.0));
        assert!(cmd.marker.is_none());

        let begin = PathCommand::arc_begin(ArcDirection::Clockwise, true);
        assert!(begin.is_arc_begin());
        assert!(begin.target.is_empty());
        assert!(PathCommand::arc_end().is_arc_end());
    }

    #[test]
    fn test_command_serializes() {
        let cmd = PathCommand::select_coordinate_system(CoordinateSystem::G55).on_line(2);
        let json = serde_json::to_string(&cmd).expect("serialize command");
        assert!(json.contains("G55"));
        let back: PathCommand = serde_json::from_str(&json).expect("deserialize command");
        assert_eq!(back, cmd);
    }
}
