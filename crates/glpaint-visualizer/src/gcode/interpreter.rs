//! G-code text to [`PathCommand`] streams
//!
//! Understands the motion subset needed for drawing toolpaths:
//! G0-G3, plane selection (G17-G19), distance mode (G90/G91) and the work
//! coordinate systems G54-G59, plus the X Y Z I J K R S words. Arcs are
//! split into line segments unless disabled in the configuration.

use glpaint_core::{
    ArcDirection, AxisWords, CoordinateOffsets, CoordinateSystem, GcodeError, MotionMode, Plane,
    Point3,
};
use glpaint_settings::RenderConfig;
use tracing::{debug, trace};

use super::command::PathCommand;
use crate::arc::{ArcFractionizer, ArcSpec};
use crate::path::ReplayStart;

/// Distance mode - Group 3 (G90/G91)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMode {
    #[default]
    Absolute,
    Incremental,
}

/// Words found on one line
#[derive(Debug, Default)]
struct Block {
    motion: Option<MotionMode>,
    plane: Option<Plane>,
    distance: Option<DistanceMode>,
    coordinate_system: Option<CoordinateSystem>,
    axes: AxisWords,
    offsets: AxisWords,
    radius: Option<f64>,
    spindle_speed: Option<f64>,
}

impl Block {
    fn has_arc_center(&self) -> bool {
        !self.offsets.is_empty() || self.radius.is_some()
    }
}

/// Modal G-code interpreter producing replay commands
#[derive(Debug, Clone)]
pub struct GcodeInterpreter {
    fractionizer: ArcFractionizer,
    fractionize_arcs: bool,
    offsets: CoordinateOffsets,
    position_m: Point3,
    coordinate_system: CoordinateSystem,
    motion: Option<MotionMode>,
    plane: Plane,
    distance: DistanceMode,
}

impl GcodeInterpreter {
    /// Interpreter positioned where the replay will start
    pub fn new(config: &RenderConfig, start: &ReplayStart) -> Self {
        Self {
            fractionizer: ArcFractionizer::from(config.arc),
            fractionize_arcs: config.path.fractionize_arcs,
            offsets: start.offsets.clone(),
            position_m: start.position_m,
            coordinate_system: start.coordinate_system,
            motion: None,
            plane: Plane::default(),
            distance: DistanceMode::default(),
        }
    }

    pub fn motion_mode(&self) -> Option<MotionMode> {
        self.motion
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn distance_mode(&self) -> DistanceMode {
        self.distance
    }

    pub fn position_m(&self) -> Point3 {
        self.position_m
    }

    fn position_w(&self) -> Point3 {
        self.offsets.to_work(self.coordinate_system, self.position_m)
    }

    /// Interpret a whole program, numbering lines from 1
    pub fn interpret_str(&mut self, program: &str) -> Result<Vec<PathCommand>, GcodeError> {
        self.interpret(program.lines())
    }

    pub fn interpret<'a, I>(&mut self, lines: I) -> Result<Vec<PathCommand>, GcodeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut commands = Vec::new();
        let mut line_count = 0;
        for (index, line) in lines.into_iter().enumerate() {
            commands.extend(self.interpret_line(index + 1, line)?);
            line_count += 1;
        }
        debug!(
            "Interpreted {} lines into {} commands",
            line_count,
            commands.len()
        );
        Ok(commands)
    }

    /// Interpret one line.
    ///
    /// Always yields at least one command tagged with `line_number`, so
    /// source lines map onto drawn segments even when they do not move.
    pub fn interpret_line(
        &mut self,
        line_number: usize,
        line: &str,
    ) -> Result<Vec<PathCommand>, GcodeError> {
        let block = parse_block(line_number, line)?;

        if let Some(plane) = block.plane {
            self.plane = plane;
        }
        if let Some(distance) = block.distance {
            self.distance = distance;
        }
        if let Some(system) = block.coordinate_system {
            self.coordinate_system = system;
        }
        if let Some(mode) = block.motion {
            self.motion = Some(mode);
        }

        let moves = !block.axes.is_empty();
        let target_w = self.resolve_target(&block.axes);

        let mut head = PathCommand::noop().on_line(line_number);
        head.motion = block.motion;
        head.coordinate_system = block.coordinate_system;
        head.spindle_speed = block.spindle_speed;

        let commands = match self.motion {
            Some(mode) if mode.is_arc() && (moves || block.has_arc_center()) => {
                let direction = if mode == MotionMode::ArcCw {
                    ArcDirection::Clockwise
                } else {
                    ArcDirection::CounterClockwise
                };
                self.arc_commands(line_number, &block, head, direction, target_w)?
            }
            _ if moves => vec![head.with_target(AxisWords::full(target_w))],
            _ => vec![head],
        };

        self.position_m = self.offsets.to_machine(self.coordinate_system, target_w);
        Ok(commands)
    }

    fn resolve_target(&self, axes: &AxisWords) -> Point3 {
        let current = self.position_w();
        match self.distance {
            DistanceMode::Absolute => axes.resolve(current),
            DistanceMode::Incremental => Point3::new(
                current.x + axes.x.unwrap_or(0.0),
                current.y + axes.y.unwrap_or(0.0),
                current.z + axes.z.unwrap_or(0.0),
            ),
        }
    }

    fn arc_commands(
        &self,
        line_number: usize,
        block: &Block,
        head: PathCommand,
        direction: ArcDirection,
        target_w: Point3,
    ) -> Result<Vec<PathCommand>, GcodeError> {
        if !self.fractionize_arcs {
            return Ok(vec![head
                .with_motion(direction.motion_mode())
                .with_target(AxisWords::full(target_w))]);
        }

        let spec = self.arc_spec(line_number, block, direction, target_w)?;
        let path = self
            .fractionizer
            .fractionize_checked(&spec)
            .map_err(|e| GcodeError::InvalidParameter {
                line_number,
                param: if block.radius.is_some() { "R" } else { "I/J/K" }.to_string(),
                reason: e.to_string(),
            })?;
        trace!(
            "Line {}: arc split into {} segments",
            line_number,
            path.segments()
        );

        let mut begin = head;
        begin.marker = PathCommand::arc_begin(direction, true).marker;

        let mut commands = Vec::with_capacity(path.len() + 1);
        commands.push(begin);
        commands.extend(
            path.iter()
                .skip(1)
                .map(|p| PathCommand::move_to(*p).on_line(line_number)),
        );
        commands.push(PathCommand::arc_end().on_line(line_number));
        Ok(commands)
    }

    fn arc_spec(
        &self,
        line_number: usize,
        block: &Block,
        direction: ArcDirection,
        target_w: Point3,
    ) -> Result<ArcSpec, GcodeError> {
        let axes = self.plane.axes();
        let position_w = self.position_w();
        let clockwise = direction.is_clockwise();

        if let Some(radius) = block.radius {
            return ArcSpec::from_radius(position_w, target_w, radius, clockwise, axes).map_err(
                |e| GcodeError::InvalidParameter {
                    line_number,
                    param: "R".to_string(),
                    reason: e.to_string(),
                },
            );
        }

        if block.offsets.get(axes.axis0).is_none() && block.offsets.get(axes.axis1).is_none() {
            return Err(GcodeError::MissingParameter {
                line_number,
                param: "I/J/K or R".to_string(),
            });
        }

        let center_offset = block.offsets.resolve(Point3::ZERO);
        Ok(ArcSpec::from_offset(
            position_w,
            target_w,
            center_offset,
            clockwise,
            axes,
        ))
    }
}

/// Remove `( ... )` and `; ...` comments
fn strip_comments(line_number: usize, line: &str) -> Result<String, GcodeError> {
    let mut out = String::with_capacity(line.len());
    let mut in_paren = false;
    for c in line.chars() {
        match (in_paren, c) {
            (false, ';') => break,
            (false, '(') => in_paren = true,
            (true, ')') => in_paren = false,
            (false, _) => out.push(c),
            (true, _) => {}
        }
    }
    if in_paren {
        return Err(GcodeError::InvalidSyntax {
            line_number,
            reason: "unterminated comment".to_string(),
        });
    }
    Ok(out)
}

/// Split a comment-free line into `(letter, value)` words.
///
/// Spaces between words are optional: `G1X10Y-2.5` is three words.
fn split_words(line_number: usize, line: &str) -> Result<Vec<(char, f64)>, GcodeError> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() || c == '%' {
            continue;
        }
        if !c.is_ascii_alphabetic() {
            return Err(GcodeError::InvalidSyntax {
                line_number,
                reason: format!("unexpected character '{}'", c),
            });
        }

        let letter = c.to_ascii_uppercase();
        let mut number = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() || matches!(d, '.' | '-' | '+') {
                number.push(d);
                chars.next();
            } else if d.is_whitespace() && number.is_empty() {
                chars.next();
            } else {
                break;
            }
        }

        let value = number
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GcodeError::InvalidParameter {
                line_number,
                param: letter.to_string(),
                reason: format!("'{}' is not a number", number),
            })?;
        words.push((letter, value));
    }

    Ok(words)
}

fn parse_block(line_number: usize, line: &str) -> Result<Block, GcodeError> {
    let code = strip_comments(line_number, line)?;
    let mut block = Block::default();

    for (letter, value) in split_words(line_number, &code)? {
        match letter {
            'G' => parse_g_word(&mut block, value),
            'X' => block.axes.x = Some(value),
            'Y' => block.axes.y = Some(value),
            'Z' => block.axes.z = Some(value),
            'I' => block.offsets.x = Some(value),
            'J' => block.offsets.y = Some(value),
            'K' => block.offsets.z = Some(value),
            'R' => block.radius = Some(value),
            'S' => {
                if value < 0.0 {
                    return Err(GcodeError::InvalidParameter {
                        line_number,
                        param: "S".to_string(),
                        reason: "spindle speed cannot be negative".to_string(),
                    });
                }
                block.spindle_speed = Some(value);
            }
            other => trace!("Line {}: ignoring word {}{}", line_number, other, value),
        }
    }

    Ok(block)
}

fn parse_g_word(block: &mut Block, value: f64) {
    if value.fract() != 0.0 || value < 0.0 {
        trace!("Ignoring G{}", value);
        return;
    }
    let code = value as u32;

    if let Some(mode) = MotionMode::from_gcode(code) {
        block.motion = Some(mode);
    } else if let Some(plane) = Plane::from_gcode(code) {
        block.plane = Some(plane);
    } else if let Some(system) = CoordinateSystem::from_gcode(code) {
        block.coordinate_system = Some(system);
    } else {
        match code {
            90 => block.distance = Some(DistanceMode::Absolute),
            91 => block.distance = Some(DistanceMode::Incremental),
            _ => trace!("Ignoring G{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::ArcMarker;

    fn interpreter(fractionize_arcs: bool) -> GcodeInterpreter {
        let mut config = RenderConfig::default();
        config.path.fractionize_arcs = fractionize_arcs;
        GcodeInterpreter::new(&config, &ReplayStart::default())
    }

    #[test]
    fn test_split_words_without_spaces() {
        let words = split_words(1, "G1X10Y-2.5 z+.5").expect("valid words");
        assert_eq!(
            words,
            vec![('G', 1.0), ('X', 10.0), ('Y', -2.5), ('Z', 0.5)]
        );
    }

    #[test]
    fn test_comments_are_stripped() {
        assert_eq!(
            strip_comments(1, "G0 (rapid) X1 ; trailing").expect("valid"),
            "G0  X1 "
        );
        assert!(matches!(
            strip_comments(4, "G0 (oops"),
            Err(GcodeError::InvalidSyntax { line_number: 4, .. })
        ));
    }

    #[test]
    fn test_every_line_yields_a_command() {
        let mut interp = interpreter(true);
        let commands = interp
            .interpret_str("G0 X1\n\n(comment only)\nG1 Y2")
            .expect("valid program");
        let lines: Vec<Option<usize>> = commands.iter().map(|c| c.source_line).collect();
        assert_eq!(lines, vec![Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(commands[0].motion, Some(MotionMode::Rapid));
        assert!(commands[1].target.is_empty());
        assert_eq!(commands[3].target, AxisWords::full(Point3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_incremental_mode_is_converted() {
        let mut interp = interpreter(true);
        let commands = interp
            .interpret_str("G91 G1 X1 Y1\nX1\nG90 X0")
            .expect("valid program");
        assert_eq!(commands[0].target, AxisWords::full(Point3::new(1.0, 1.0, 0.0)));
        assert_eq!(commands[1].target, AxisWords::full(Point3::new(2.0, 1.0, 0.0)));
        assert_eq!(commands[2].target, AxisWords::full(Point3::new(0.0, 1.0, 0.0)));
        assert_eq!(interp.distance_mode(), DistanceMode::Absolute);
    }

    #[test]
    fn test_arc_is_bracketed_and_split() {
        let mut interp = interpreter(true);
        let commands = interp
            .interpret_str("G0 X0 Y10\nG2 X10 Y0 I0 J-10")
            .expect("valid program");

        let arc: Vec<&PathCommand> = commands.iter().filter(|c| c.source_line == Some(2)).collect();
        assert_eq!(
            arc[0].marker,
            Some(ArcMarker::Begin {
                direction: ArcDirection::Clockwise,
                synthetic: true
            })
        );
        assert_eq!(arc[0].motion, Some(MotionMode::ArcCw));
        assert!(arc[arc.len() - 1].is_arc_end());
        // 27 segments: begin marker, 27 moves, end marker
        assert_eq!(arc.len(), 29);
        assert_eq!(
            arc[arc.len() - 2].target,
            AxisWords::full(Point3::new(10.0, 0.0, 0.0))
        );
        assert_eq!(interp.position_m(), Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_arc_passthrough_without_fractionizing() {
        let mut interp = interpreter(false);
        let commands = interp
            .interpret_str("G0 X0 Y10\nG3 X10 Y0 R10")
            .expect("valid program");
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].motion, Some(MotionMode::ArcCcw));
        assert!(commands[1].marker.is_none());
    }

    #[test]
    fn test_arc_errors() {
        let mut interp = interpreter(true);
        assert!(matches!(
            interp.interpret_line(1, "G2 X10 Y0"),
            Err(GcodeError::MissingParameter { line_number: 1, .. })
        ));
        assert!(matches!(
            interp.interpret_line(2, "G2 X10 Y0 R1"),
            Err(GcodeError::InvalidParameter { line_number: 2, ref param, .. }) if param == "R"
        ));
        assert!(matches!(
            interp.interpret_line(3, "G1 X1.2.3"),
            Err(GcodeError::InvalidParameter { line_number: 3, ref param, .. }) if param == "X"
        ));
        assert!(matches!(
            interp.interpret_line(4, "G1 X1 #5"),
            Err(GcodeError::InvalidSyntax { line_number: 4, .. })
        ));
    }

    #[test]
    fn test_oversized_arc_is_an_error() {
        let mut interp = interpreter(true);
        let line = format!("G2 I1{}", "0".repeat(25));
        let err = interp.interpret_line(7, &line).expect_err("too many segments");
        assert!(matches!(
            err,
            GcodeError::InvalidParameter { line_number: 7, ref param, ref reason }
                if param == "I/J/K" && reason.contains("segments")
        ));

        // unsplit arcs are drawn as one segment
        let commands = interpreter(false)
            .interpret_line(7, &line)
            .expect("passthrough arc");
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_coordinate_system_switch() {
        let offsets = CoordinateOffsets::new()
            .with_offset(CoordinateSystem::G55, Point3::new(10.0, 0.0, 0.0));
        let start = ReplayStart::new(Point3::ZERO).with_offsets(offsets);
        let mut interp = GcodeInterpreter::new(&RenderConfig::default(), &start);

        let commands = interp
            .interpret_str("G55\nG91 G1 X1")
            .expect("valid program");
        assert_eq!(commands[0].coordinate_system, Some(CoordinateSystem::G55));
        // machine stays at 0, which is -10 in G55
        assert_eq!(commands[1].target, AxisWords::full(Point3::new(-9.0, 0.0, 0.0)));
        assert_eq!(interp.position_m(), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_other_words_ignored() {
        let mut interp = interpreter(true);
        let commands = interp
            .interpret_str("N10 G21 G1 X5 F500 M3 S1000 T1")
            .expect("valid program");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].spindle_speed, Some(1000.0));
        assert_eq!(interp.motion_mode(), Some(MotionMode::Linear));
    }
}
