//! CPU-side vertex storage and the GPU upload seam
//!
//! A [`VertexBuffer`] holds the vertices of one item up to a reserved
//! maximum. Moving the bytes to the graphics API is left to a
//! [`GpuBuffer`] implementation owned by the rendering layer.

use glpaint_core::{BufferError, ColoredVertex, Point3, Rgba};
use tracing::{trace, warn};

/// Destination for vertex bytes, typically a GPU array buffer
pub trait GpuBuffer {
    /// Replace the entire buffer contents
    fn upload(&mut self, data: &[u8]);

    /// Overwrite `data.len()` bytes starting at byte `offset`
    fn write_sub_data(&mut self, offset: usize, data: &[u8]);
}

/// In-memory [`GpuBuffer`] for headless use and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostBuffer {
    bytes: Vec<u8>,
    uploads: usize,
    sub_writes: usize,
}

impl HostBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of full uploads received
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Number of partial writes received
    pub fn sub_write_count(&self) -> usize {
        self.sub_writes
    }

    /// Decode vertex `index` from the stored bytes
    pub fn vertex(&self, index: usize) -> Option<ColoredVertex> {
        let start = index.checked_mul(ColoredVertex::STRIDE)?;
        let record = self.bytes.get(start..start + ColoredVertex::STRIDE)?;
        Some(bytemuck::pod_read_unaligned(record))
    }
}

impl GpuBuffer for HostBuffer {
    fn upload(&mut self, data: &[u8]) {
        self.bytes.clear();
        self.bytes.extend_from_slice(data);
        self.uploads += 1;
    }

    fn write_sub_data(&mut self, offset: usize, data: &[u8]) {
        match self.bytes.get_mut(offset..offset + data.len()) {
            Some(dst) => {
                dst.copy_from_slice(data);
                self.sub_writes += 1;
            }
            None => warn!(
                "Ignoring write of {} bytes at offset {} past buffer end {}",
                data.len(),
                offset,
                self.bytes.len()
            ),
        }
    }
}

/// Vertices of one item with a fixed maximum count.
///
/// Appending past the maximum fails instead of truncating. The maximum can
/// be raised with [`grow_to`](Self::grow_to) but never lowered.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    label: String,
    capacity: usize,
    vertices: Vec<ColoredVertex>,
}

impl VertexBuffer {
    pub fn new(label: impl Into<String>, capacity: usize) -> Self {
        Self {
            label: label.into(),
            capacity,
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Buffer sized exactly for `vertices`
    pub fn from_vertices(label: impl Into<String>, vertices: Vec<ColoredVertex>) -> Self {
        Self {
            label: label.into(),
            capacity: vertices.len(),
            vertices,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }

    pub fn push(&mut self, position: Point3, color: Rgba) -> Result<(), BufferError> {
        self.append(&[ColoredVertex::new(position, color)])
    }

    /// Append all of `vertices` or none of them
    pub fn append(&mut self, vertices: &[ColoredVertex]) -> Result<(), BufferError> {
        if self.vertices.len() + vertices.len() > self.capacity {
            return Err(BufferError::CapacityExceeded {
                label: self.label.clone(),
                capacity: self.capacity,
            });
        }
        self.vertices.extend_from_slice(vertices);
        Ok(())
    }

    /// Raise the maximum vertex count
    pub fn grow_to(&mut self, capacity: usize) -> Result<(), BufferError> {
        if capacity < self.capacity {
            return Err(BufferError::ShrinkNotSupported {
                label: self.label.clone(),
                capacity: self.capacity,
                requested: capacity,
            });
        }
        self.vertices.reserve(capacity - self.vertices.len());
        self.capacity = capacity;
        Ok(())
    }

    /// Forget all vertices, keeping the maximum
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Replace position and color of an emitted vertex.
    ///
    /// Returns `false` and changes nothing when `index` is out of range.
    pub fn substitute(&mut self, index: usize, position: Point3, color: Rgba) -> bool {
        match self.vertices.get_mut(index) {
            Some(v) => {
                *v = ColoredVertex::new(position, color);
                true
            }
            None => {
                trace!("{}: substitute of vertex {} skipped", self.label, index);
                false
            }
        }
    }

    /// Replace only the color of an emitted vertex
    pub fn substitute_color(&mut self, index: usize, color: Rgba) -> bool {
        match self.vertices.get_mut(index) {
            Some(v) => {
                v.color = color;
                true
            }
            None => {
                trace!("{}: color substitute of vertex {} skipped", self.label, index);
                false
            }
        }
    }

    /// Checked access for callers that treat a bad index as an error
    pub fn get(&self, index: usize) -> Result<&ColoredVertex, BufferError> {
        self.vertices
            .get(index)
            .ok_or_else(|| BufferError::IndexOutOfRange {
                label: self.label.clone(),
                index,
                count: self.vertices.len(),
            })
    }

    /// Byte offset of the color of vertex `index` in the uploaded data
    pub fn color_offset(index: usize) -> usize {
        index * ColoredVertex::STRIDE + ColoredVertex::COLOR_OFFSET
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn upload_to(&self, gpu: &mut dyn GpuBuffer) {
        gpu.upload(self.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_append_rejects_overflow_without_truncating() {
        let mut buffer = VertexBuffer::new("star", 2);
        buffer.push(Point3::ZERO, RED).expect("first vertex fits");

        let batch = [
            ColoredVertex::new(Point3::X, RED),
            ColoredVertex::new(Point3::Y, RED),
        ];
        let err = buffer.append(&batch).expect_err("would exceed capacity");
        assert_eq!(
            err,
            BufferError::CapacityExceeded {
                label: "star".to_string(),
                capacity: 2
            }
        );
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_grow_to_only_grows() {
        let mut buffer = VertexBuffer::new("grid", 4);
        assert!(buffer.grow_to(8).is_ok());
        assert_eq!(buffer.capacity(), 8);
        assert!(matches!(
            buffer.grow_to(2),
            Err(BufferError::ShrinkNotSupported {
                capacity: 8,
                requested: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_substitute_ignores_out_of_range() {
        let mut buffer = VertexBuffer::new("arc", 2);
        buffer.push(Point3::ZERO, RED).expect("fits");

        assert!(buffer.substitute_color(0, [0.0, 1.0, 0.0, 1.0]));
        assert!(!buffer.substitute_color(1, [0.0, 1.0, 0.0, 1.0]));
        assert!(!buffer.substitute(5, Point3::X, RED));
        assert_eq!(buffer.vertices()[0].color, [0.0, 1.0, 0.0, 1.0]);
        assert!(buffer.get(1).is_err());
    }

    #[test]
    fn test_upload_and_partial_write() {
        let mut buffer = VertexBuffer::new("path", 2);
        buffer.push(Point3::ZERO, RED).expect("fits");
        buffer.push(Point3::X, RED).expect("fits");
        assert_eq!(buffer.as_bytes().len(), 2 * ColoredVertex::STRIDE);

        let mut gpu = HostBuffer::new();
        buffer.upload_to(&mut gpu);
        assert_eq!(gpu.upload_count(), 1);

        let green: Rgba = [0.0, 1.0, 0.0, 1.0];
        gpu.write_sub_data(VertexBuffer::color_offset(1), bytemuck::cast_slice(&green));
        assert_eq!(gpu.vertex(1).map(|v| v.color), Some(green));
        assert_eq!(gpu.vertex(0).map(|v| v.color), Some(RED));
        assert_eq!(gpu.vertex(2), None);

        gpu.write_sub_data(1000, bytemuck::cast_slice(&green));
        assert_eq!(gpu.sub_write_count(), 1);
    }
}
