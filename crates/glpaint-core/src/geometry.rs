//! Geometry value types shared by the fractionizer, the replay and the items.

use serde::{Deserialize, Serialize};

/// Point or vector in machine space.
///
/// `glam::DVec3` indexes by `usize`, so `point[axis.index()]` reads one
/// coordinate.
pub type Point3 = glam::DVec3;

/// Cartesian machine axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a `Point3`
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis letter as written in G-code
    pub const fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

/// The two in-plane axes of an arc and its linear (helical) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneAxes {
    pub axis0: Axis,
    pub axis1: Axis,
    pub linear: Axis,
}

impl PlaneAxes {
    pub const XY: PlaneAxes = PlaneAxes {
        axis0: Axis::X,
        axis1: Axis::Y,
        linear: Axis::Z,
    };

    pub const ZX: PlaneAxes = PlaneAxes {
        axis0: Axis::Z,
        axis1: Axis::X,
        linear: Axis::Y,
    };

    pub const YZ: PlaneAxes = PlaneAxes {
        axis0: Axis::Y,
        axis1: Axis::Z,
        linear: Axis::X,
    };

    /// Component indices `(axis0, axis1, linear)`
    pub const fn indices(&self) -> (usize, usize, usize) {
        (self.axis0.index(), self.axis1.index(), self.linear.index())
    }
}

impl Default for PlaneAxes {
    fn default() -> Self {
        Self::XY
    }
}

/// Arc plane selection (G17, G18, G19)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Plane {
    /// G17
    #[default]
    Xy,
    /// G18
    Zx,
    /// G19
    Yz,
}

impl Plane {
    pub const fn axes(self) -> PlaneAxes {
        match self {
            Plane::Xy => PlaneAxes::XY,
            Plane::Zx => PlaneAxes::ZX,
            Plane::Yz => PlaneAxes::YZ,
        }
    }

    /// Plane for a G-code number (17, 18, 19)
    pub fn from_gcode(code: u32) -> Option<Self> {
        match code {
            17 => Some(Plane::Xy),
            18 => Some(Plane::Zx),
            19 => Some(Plane::Yz),
            _ => None,
        }
    }
}

/// Partially specified coordinate triple, as written in one G-code block.
///
/// Axes left as `None` keep the current machine coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisWords {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl AxisWords {
    pub fn new(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Self { x, y, z }
    }

    /// All three axes given
    pub fn full(point: Point3) -> Self {
        Self {
            x: Some(point.x),
            y: Some(point.y),
            z: Some(point.z),
        }
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = Some(value),
            Axis::Y => self.y = Some(value),
            Axis::Z => self.z = Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Fill missing axes from `fallback`
    pub fn resolve(&self, fallback: Point3) -> Point3 {
        Point3::new(
            self.x.unwrap_or(fallback.x),
            self.y.unwrap_or(fallback.y),
            self.z.unwrap_or(fallback.z),
        )
    }
}

/// Convert to the `f32` layout used in vertex data
pub fn to_f32_array(p: Point3) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_axes_match_gcode_planes() {
        assert_eq!(Plane::from_gcode(17).map(Plane::axes), Some(PlaneAxes::XY));
        assert_eq!(Plane::Zx.axes().indices(), (2, 0, 1));
        assert_eq!(Plane::Yz.axes().indices(), (1, 2, 0));
        assert_eq!(Plane::from_gcode(20), None);
    }

    #[test]
    fn test_axis_words_resolve_keeps_missing_axes() {
        let words = AxisWords::new(Some(5.0), None, Some(-1.0));
        let p = words.resolve(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Point3::new(5.0, 2.0, -1.0));
        assert!(!words.is_empty());
        assert!(AxisWords::default().is_empty());
    }

    #[test]
    fn test_point_indexing_by_axis() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(p[Axis::Y.index()], 2.0);
        assert_eq!(p[Axis::Z.index()], 3.0);
    }
}
