//! G-code toolpath item
//!
//! Replays a command stream once into a line strip. Highlighting a source
//! line later recolors only that line's vertices, in the CPU copy and in
//! the uploaded buffer, without replaying the path.

use glpaint_core::{ColoredVertex, Result, Rgba};
use glpaint_settings::RenderConfig;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, warn};

use super::{Drawable, Primitive};
use crate::buffer::{GpuBuffer, VertexBuffer};
use crate::gcode::{GcodeInterpreter, PathCommand};
use crate::highlight::{HighlightHandle, HighlightQueue};
use crate::path::{Bounds, MachineState, MotionReplay, ReplayStart};

#[derive(Debug)]
pub struct GcodePath {
    buffer: VertexBuffer,
    line_spans: BTreeMap<usize, Range<usize>>,
    bounds: Bounds,
    final_state: MachineState,
    arc_count: usize,
    highlights: HighlightQueue,
    highlight_color: Rgba,
}

impl GcodePath {
    /// Build from an already normalized command stream
    pub fn new(
        label: impl Into<String>,
        commands: &[PathCommand],
        start: &ReplayStart,
        config: &RenderConfig,
    ) -> Result<Self> {
        let output = MotionReplay::from_config(config).replay(commands, start);

        let mut buffer = VertexBuffer::new(label, 2 * commands.len() + 1);
        buffer.append(&output.vertices)?;
        debug!(
            "Toolpath '{}': {} commands, {} vertices",
            buffer.label(),
            commands.len(),
            buffer.len()
        );

        Ok(Self {
            buffer,
            line_spans: output.line_spans,
            bounds: output.bounds,
            final_state: output.final_state,
            arc_count: output.arc_count,
            highlights: HighlightQueue::new(),
            highlight_color: config.path.highlight_color,
        })
    }

    /// Interpret G-code text and build the path
    pub fn from_gcode(
        label: impl Into<String>,
        program: &str,
        start: &ReplayStart,
        config: &RenderConfig,
    ) -> Result<Self> {
        let commands = GcodeInterpreter::new(config, start).interpret_str(program)?;
        Self::new(label, &commands, start, config)
    }

    /// Handle for queueing highlights from other threads
    pub fn highlight_handle(&self) -> HighlightHandle {
        self.highlights.handle()
    }

    /// Queue a 1-based source line; applied on the next
    /// [`apply_highlights`](Self::apply_highlights)
    pub fn highlight_line(&self, line_number: usize) {
        self.highlights.handle().highlight_line(line_number);
    }

    /// Recolor every queued line and clear the queue.
    ///
    /// Lines that produced no commands are skipped. Returns the number of
    /// vertices recolored.
    pub fn apply_highlights(&mut self, gpu: &mut dyn GpuBuffer) -> usize {
        let color_bytes: &[u8] = bytemuck::cast_slice(&self.highlight_color);
        let mut recolored = 0;

        for line_number in self.highlights.drain() {
            let Some(span) = self.line_spans.get(&line_number) else {
                warn!(
                    "Toolpath '{}': no commands for highlighted line {}",
                    self.buffer.label(),
                    line_number
                );
                continue;
            };

            for index in 2 * span.start + 1..2 * span.end + 1 {
                if self.buffer.substitute_color(index, self.highlight_color) {
                    gpu.write_sub_data(VertexBuffer::color_offset(index), color_bytes);
                    recolored += 1;
                }
            }
        }

        recolored
    }

    pub fn upload(&self, gpu: &mut dyn GpuBuffer) {
        self.buffer.upload_to(gpu);
    }

    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    pub fn line_spans(&self) -> &BTreeMap<usize, Range<usize>> {
        &self.line_spans
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn final_state(&self) -> &MachineState {
        &self.final_state
    }

    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    pub fn command_count(&self) -> usize {
        self.buffer.len().saturating_sub(1) / 2
    }
}

impl Drawable for GcodePath {
    fn primitive(&self) -> Primitive {
        Primitive::LineStrip
    }

    fn vertices(&self) -> &[ColoredVertex] {
        self.buffer.vertices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::HostBuffer;
    use glpaint_core::constants::HIGHLIGHT_COLOR;

    fn path(program: &str) -> GcodePath {
        GcodePath::from_gcode(
            "toolpath",
            program,
            &ReplayStart::default(),
            &RenderConfig::default(),
        )
        .expect("valid program")
    }

    #[test]
    fn test_buffer_sized_for_commands() {
        let p = path("G0 X1\nG1 X2\nG1 X3");
        assert_eq!(p.command_count(), 3);
        assert_eq!(p.buffer().capacity(), 7);
        assert_eq!(p.vertex_count(), 7);
        assert_eq!(p.primitive(), Primitive::LineStrip);
    }

    #[test]
    fn test_highlight_recolors_line_pair() {
        let mut p = path("G0 X1\nG1 X2\nG1 X3");
        let mut gpu = HostBuffer::new();
        p.upload(&mut gpu);

        p.highlight_line(2);
        assert_eq!(p.apply_highlights(&mut gpu), 2);

        for index in [3, 4] {
            assert_eq!(p.vertices()[index].color, HIGHLIGHT_COLOR);
            assert_eq!(gpu.vertex(index).map(|v| v.color), Some(HIGHLIGHT_COLOR));
        }
        assert_ne!(p.vertices()[2].color, HIGHLIGHT_COLOR);
        assert_ne!(gpu.vertex(5).map(|v| v.color), Some(HIGHLIGHT_COLOR));

        // queue is cleared after each pass
        assert_eq!(p.apply_highlights(&mut gpu), 0);
    }

    #[test]
    fn test_out_of_range_highlight_skipped() {
        let mut p = path("G1 X1");
        let mut gpu = HostBuffer::new();
        p.upload(&mut gpu);

        let handle = p.highlight_handle();
        handle.highlight_line(0);
        handle.highlight_line(99);
        assert_eq!(p.apply_highlights(&mut gpu), 0);
        assert_eq!(gpu.sub_write_count(), 0);
    }

    #[test]
    fn test_highlight_covers_whole_arc() {
        let mut p = path("G0 X0 Y10\nG2 X10 Y0 I0 J-10");
        let mut gpu = HostBuffer::new();
        p.upload(&mut gpu);
        assert_eq!(p.arc_count(), 1);

        p.highlight_line(2);
        // begin marker, 27 segments, end marker; two vertices each
        assert_eq!(p.apply_highlights(&mut gpu), 58);
        assert!(p.vertices()[3..].iter().all(|v| v.color == HIGHLIGHT_COLOR));
    }
}
