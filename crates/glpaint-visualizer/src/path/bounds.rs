use glpaint_core::Point3;
use serde::Serialize;

/// Axis-aligned extent of a toolpath in machine coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Empty bounds; invalid until the first `update`
    pub fn new() -> Self {
        Self {
            min: Point3::splat(f64::MAX),
            max: Point3::splat(f64::MIN),
        }
    }

    pub fn update(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn merge(&mut self, other: &Bounds) {
        if other.is_valid() {
            self.update(other.min);
            self.update(other.max);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            // a flat path (min_z == max_z) is still valid
            && self.min.cmple(self.max).all()
    }

    /// Extent per axis, zero when invalid
    pub fn size(&self) -> Point3 {
        if self.is_valid() {
            self.max - self.min
        } else {
            Point3::ZERO
        }
    }

    pub fn center(&self) -> Option<Point3> {
        self.is_valid().then(|| (self.min + self.max) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_invalid() {
        let bounds = Bounds::new();
        assert!(!bounds.is_valid());
        assert_eq!(bounds.size(), Point3::ZERO);
        assert_eq!(bounds.center(), None);
    }

    #[test]
    fn test_update_and_merge() {
        let mut bounds = Bounds::new();
        bounds.update(Point3::new(1.0, -2.0, 0.0));
        bounds.update(Point3::new(-1.0, 4.0, 0.0));
        assert!(bounds.is_valid());
        assert_eq!(bounds.size(), Point3::new(2.0, 6.0, 0.0));
        assert_eq!(bounds.center(), Some(Point3::new(0.0, 1.0, 0.0)));

        let mut other = Bounds::new();
        other.update(Point3::new(0.0, 0.0, 5.0));
        bounds.merge(&other);
        assert_eq!(bounds.max.z, 5.0);

        bounds.merge(&Bounds::new());
        assert_eq!(bounds.min, Point3::new(-1.0, -2.0, 0.0));
    }
}
