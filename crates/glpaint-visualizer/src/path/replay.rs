//! Motion replay
//!
//! Runs a [`PathCommand`] stream through a small machine model and turns
//! every command into one colored line segment. Colors encode the motion
//! mode, arc parity and spindle speed.

use glpaint_core::constants::SPINDLE_SPEED_FULL_SCALE;
use glpaint_core::{
    with_alpha, ArcDirection, ColoredVertex, CoordinateOffsets, CoordinateSystem, MotionMode,
    Point3, Rgba,
};
use glpaint_settings::{PathPalette, RenderConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, trace};

use super::bounds::Bounds;
use crate::gcode::{ArcMarker, PathCommand};

/// Initial conditions of a replay pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayStart {
    /// Machine position before the first command
    pub position_m: Point3,
    pub coordinate_system: CoordinateSystem,
    /// Work offsets; fixed for the pass
    pub offsets: CoordinateOffsets,
}

impl ReplayStart {
    pub fn new(position_m: Point3) -> Self {
        Self {
            position_m,
            ..Self::default()
        }
    }

    pub fn with_coordinate_system(mut self, system: CoordinateSystem) -> Self {
        self.coordinate_system = system;
        self
    }

    pub fn with_offsets(mut self, offsets: CoordinateOffsets) -> Self {
        self.offsets = offsets;
        self
    }
}

/// Modal machine state tracked while replaying
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MachineState {
    /// Current machine position
    pub position_m: Point3,
    /// Machine target of the command being replayed
    pub target_m: Point3,
    pub coordinate_system: CoordinateSystem,
    pub motion_mode: Option<MotionMode>,
    pub spindle_speed: Option<f64>,
}

impl MachineState {
    pub fn new(start: &ReplayStart) -> Self {
        Self {
            position_m: start.position_m,
            target_m: start.position_m,
            coordinate_system: start.coordinate_system,
            motion_mode: None,
            spindle_speed: None,
        }
    }

    /// Current position in work coordinates
    pub fn position_w(&self, offsets: &CoordinateOffsets) -> Point3 {
        offsets.to_work(self.coordinate_system, self.position_m)
    }

    /// Take over the modal words of `cmd` and compute its machine target
    fn apply(&mut self, cmd: &PathCommand, offsets: &CoordinateOffsets) {
        if let Some(system) = cmd.coordinate_system {
            self.coordinate_system = system;
        }
        if let Some(mode) = cmd.motion {
            self.motion_mode = Some(mode);
        }
        if let Some(speed) = cmd.spindle_speed {
            self.spindle_speed = Some(speed);
        }

        let target_w = cmd.target.resolve(self.position_w(offsets));
        self.target_m = offsets.to_machine(self.coordinate_system, target_w);
    }

    fn done(&mut self) {
        self.position_m = self.target_m;
    }
}

/// Drawing state of the replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayState {
    /// No motion mode has been set yet
    #[default]
    Idle,
    /// Straight moves colored by the modal motion mode
    Linear,
    /// Inside an arc bracket
    Arc {
        direction: ArcDirection,
        synthetic: bool,
        /// Set for the 1st, 3rd, ... arc of the pass
        alternate: bool,
    },
}

/// Result of one replay pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutput {
    /// Start vertex followed by two vertices per command
    pub vertices: Vec<ColoredVertex>,
    /// Source line to the range of command indices it produced
    pub line_spans: BTreeMap<usize, Range<usize>>,
    /// Extent of all machine positions visited
    pub bounds: Bounds,
    pub final_state: MachineState,
    /// Number of arc brackets entered
    pub arc_count: usize,
}

impl ReplayOutput {
    pub fn command_count(&self) -> usize {
        self.vertices.len().saturating_sub(1) / 2
    }

    /// Vertex indices drawn for a source line
    pub fn vertex_range(&self, line_number: usize) -> Option<Range<usize>> {
        self.line_spans
            .get(&line_number)
            .map(|span| 2 * span.start + 1..2 * span.end + 1)
    }
}

/// Replays command streams into colored vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionReplay {
    palette: PathPalette,
    approach_fraction: f64,
}

impl Default for MotionReplay {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl MotionReplay {
    pub fn new(palette: PathPalette, approach_fraction: f64) -> Self {
        Self {
            palette,
            approach_fraction,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.palette, config.path.approach_fraction)
    }

    pub fn palette(&self) -> &PathPalette {
        &self.palette
    }

    /// Replay `commands` from `start`.
    ///
    /// Emits `2 * commands.len() + 1` vertices. Each command draws from a
    /// point slightly past the current position to its exact target, so
    /// neighbouring segments do not share a vertex.
    pub fn replay(&self, commands: &[PathCommand], start: &ReplayStart) -> ReplayOutput {
        let mut machine = MachineState::new(start);
        let mut state = ReplayState::Idle;
        let mut arc_count = 0usize;
        let mut bounds = Bounds::new();
        let mut line_spans: BTreeMap<usize, Range<usize>> = BTreeMap::new();

        let mut vertices = Vec::with_capacity(2 * commands.len() + 1);
        vertices.push(ColoredVertex::new(
            machine.position_m,
            with_alpha(self.palette.base(Some(MotionMode::Rapid)), 1.0),
        ));
        bounds.update(machine.position_m);

        for (index, cmd) in commands.iter().enumerate() {
            machine.apply(cmd, &start.offsets);

            match cmd.marker {
                Some(ArcMarker::Begin {
                    direction,
                    synthetic,
                }) => {
                    arc_count += 1;
                    state = ReplayState::Arc {
                        direction,
                        synthetic,
                        alternate: arc_count % 2 == 1,
                    };
                }
                Some(ArcMarker::End) => state = ReplayState::Idle,
                None => {}
            }
            if !matches!(state, ReplayState::Arc { .. }) && machine.motion_mode.is_some() {
                state = ReplayState::Linear;
            }

            let (leading, trailing) = self.segment_colors(&state, &machine);
            let approach = machine.position_m
                + (machine.target_m - machine.position_m) * self.approach_fraction;

            trace!(
                "Command {}: {:?} {:?} -> {:?}",
                index,
                state,
                machine.position_m,
                machine.target_m
            );
            vertices.push(ColoredVertex::new(approach, leading));
            vertices.push(ColoredVertex::new(machine.target_m, trailing));
            bounds.update(machine.target_m);

            let line = cmd.source_line.unwrap_or(index + 1);
            line_spans
                .entry(line)
                .and_modify(|span| span.end = index + 1)
                .or_insert(index..index + 1);

            machine.done();
        }

        debug!(
            "Replayed {} commands into {} vertices ({} arcs)",
            commands.len(),
            vertices.len(),
            arc_count
        );

        ReplayOutput {
            vertices,
            line_spans,
            bounds,
            final_state: machine,
            arc_count,
        }
    }

    /// Leading and trailing vertex colors of one segment
    pub fn segment_colors(&self, state: &ReplayState, machine: &MachineState) -> (Rgba, Rgba) {
        let (leading, trailing) = match *state {
            ReplayState::Arc {
                direction,
                synthetic,
                alternate,
            } => {
                let base = self.palette.base(Some(direction.motion_mode()));
                let alpha = if alternate {
                    self.palette.arc_alternate_alpha
                } else {
                    1.0
                };
                let leading = with_alpha(base, alpha);
                let trailing = if synthetic {
                    leading
                } else {
                    with_alpha(base, self.palette.arc_trailing_alpha)
                };
                (leading, trailing)
            }
            ReplayState::Idle | ReplayState::Linear => {
                let base = self.palette.base(machine.motion_mode);
                (
                    with_alpha(base, 1.0),
                    with_alpha(base, self.palette.trailing_alpha),
                )
            }
        };

        match machine.spindle_speed {
            Some(speed) => {
                let level = (speed / SPINDLE_SPEED_FULL_SCALE) as f32;
                (leading, [level, level, level, 1.0])
            }
            None => (leading, trailing),
        }
    }
}
