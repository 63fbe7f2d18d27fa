//! Arc fractionizer
//!
//! Approximates circular and helical arcs with line segments whose maximum
//! deviation from the true arc stays within a chord tolerance. The sweep and
//! segment computation follow Grbl's `mc_arc` motion-control routine.

use glpaint_core::constants::{ARC_ANGULAR_TRAVEL_EPSILON, ARC_MAX_SEGMENTS, ARC_TOLERANCE};
use glpaint_core::{ArcEndpoint, GeometryError, PlaneAxes, Point3};
use glpaint_settings::{ArcSettings, ArcValidation};
use std::f64::consts::PI;
use tracing::{trace, warn};

/// A circular arc, possibly helical along the plane's linear axis.
///
/// `position`, `target` and `center_offset` over-determine the arc; only the
/// caller can keep them consistent with `radius`. Use
/// [`ArcFractionizer::validate`] to check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    /// Start of the arc
    pub position: Point3,
    /// End of the arc
    pub target: Point3,
    /// Offset of the center from `position`
    pub center_offset: Point3,
    /// Radius used to size the segments
    pub radius: f64,
    pub clockwise: bool,
    pub plane: PlaneAxes,
}

impl ArcSpec {
    /// Arc in the XY plane
    pub fn new(
        position: Point3,
        target: Point3,
        center_offset: Point3,
        radius: f64,
        clockwise: bool,
    ) -> Self {
        Self {
            position,
            target,
            center_offset,
            radius,
            clockwise,
            plane: PlaneAxes::XY,
        }
    }

    pub fn with_plane(mut self, plane: PlaneAxes) -> Self {
        self.plane = plane;
        self
    }

    /// Arc whose radius is the in-plane length of `center_offset`
    pub fn from_offset(
        position: Point3,
        target: Point3,
        center_offset: Point3,
        clockwise: bool,
        plane: PlaneAxes,
    ) -> Self {
        let (a0, a1, _) = plane.indices();
        Self {
            position,
            target,
            center_offset,
            radius: center_offset[a0].hypot(center_offset[a1]),
            clockwise,
            plane,
        }
    }

    /// Arc given in radius format (G-code `R` word).
    ///
    /// A positive radius selects the arc of at most 180 degrees, a negative
    /// one the longer solution.
    pub fn from_radius(
        position: Point3,
        target: Point3,
        radius: f64,
        clockwise: bool,
        plane: PlaneAxes,
    ) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius != 0.0) {
            return Err(GeometryError::NonPositiveRadius { radius });
        }

        let (a0, a1, _) = plane.indices();
        let x = target[a0] - position[a0];
        let y = target[a1] - position[a1];
        let chord = x.hypot(y);
        if chord == 0.0 {
            return Err(GeometryError::ZeroLengthChord);
        }

        let discriminant = 4.0 * radius * radius - x * x - y * y;
        if discriminant < 0.0 {
            return Err(GeometryError::RadiusTooSmall {
                radius: radius.abs(),
                chord,
            });
        }

        let mut h_x2_div_d = -discriminant.sqrt() / chord;
        if !clockwise {
            h_x2_div_d = -h_x2_div_d;
        }
        if radius < 0.0 {
            h_x2_div_d = -h_x2_div_d;
        }

        let mut center_offset = Point3::ZERO;
        center_offset[a0] = 0.5 * (x - y * h_x2_div_d);
        center_offset[a1] = 0.5 * (y + x * h_x2_div_d);

        Ok(Self {
            position,
            target,
            center_offset,
            radius: radius.abs(),
            clockwise,
            plane,
        })
    }

    /// In-plane center; the linear coordinate is taken from `position`
    pub fn center(&self) -> Point3 {
        let (a0, a1, _) = self.plane.indices();
        let mut center = self.position;
        center[a0] += self.center_offset[a0];
        center[a1] += self.center_offset[a1];
        center
    }
}

/// Ordered points from an arc's start to its target.
///
/// The first point is the arc start and the last is the target, bit for bit.
#[derive(Debug, Clone, PartialEq)]
pub struct FractionizedPath {
    points: Vec<Point3>,
    segments: usize,
}

impl FractionizedPath {
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    /// Segment count from the tolerance formula; 0 for a straight
    /// substitute
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a FractionizedPath {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Arc-to-polyline converter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFractionizer {
    tolerance: f64,
    angular_epsilon: f64,
    validation: ArcValidation,
    max_segments: usize,
}

impl Default for ArcFractionizer {
    fn default() -> Self {
        Self::new(ARC_TOLERANCE, ARC_ANGULAR_TRAVEL_EPSILON)
    }
}

impl From<ArcSettings> for ArcFractionizer {
    fn from(settings: ArcSettings) -> Self {
        Self {
            tolerance: settings.tolerance,
            angular_epsilon: settings.angular_epsilon,
            validation: settings.validation,
            max_segments: settings.max_segments,
        }
    }
}

impl ArcFractionizer {
    pub fn new(tolerance: f64, angular_epsilon: f64) -> Self {
        Self {
            tolerance,
            angular_epsilon,
            validation: ArcValidation::Off,
            max_segments: ARC_MAX_SEGMENTS,
        }
    }

    pub fn with_validation(mut self, validation: ArcValidation) -> Self {
        self.validation = validation;
        self
    }

    /// Cap the chords of one arc; at least one is always allowed
    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments.max(1);
        self
    }

    pub fn max_segments(&self) -> usize {
        self.max_segments
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn validation(&self) -> ArcValidation {
        self.validation
    }

    /// Signed sweep angle in radians: negative for clockwise arcs, positive
    /// for counterclockwise. A start equal to the target sweeps a full turn.
    pub fn angular_travel(&self, spec: &ArcSpec) -> f64 {
        let (a0, a1, _) = spec.plane.indices();
        let center0 = spec.position[a0] + spec.center_offset[a0];
        let center1 = spec.position[a1] + spec.center_offset[a1];

        let r0 = -spec.center_offset[a0];
        let r1 = -spec.center_offset[a1];
        let rt0 = spec.target[a0] - center0;
        let rt1 = spec.target[a1] - center1;

        let mut travel = (r0 * rt1 - r1 * rt0).atan2(r0 * rt0 + r1 * rt1);
        if spec.clockwise {
            if travel >= -self.angular_epsilon {
                travel -= 2.0 * PI;
            }
        } else if travel <= self.angular_epsilon {
            travel += 2.0 * PI;
        }
        travel
    }

    /// Number of chords needed to keep within the tolerance, ignoring the
    /// segment limit
    pub fn segment_count(&self, spec: &ArcSpec) -> usize {
        self.segments_for(spec, self.angular_travel(spec))
    }

    fn segments_for(&self, spec: &ArcSpec, angular_travel: f64) -> usize {
        let max_chord = (self.tolerance * (2.0 * spec.radius - self.tolerance)).sqrt();
        let segments = ((0.5 * angular_travel * spec.radius).abs() / max_chord).floor();
        // NaN (radius <= 0) and infinity (radius == tolerance / 2) both
        // degrade to a straight line.
        if segments.is_finite() && segments >= 1.0 {
            // saturates at usize::MAX
            segments as usize
        } else {
            0
        }
    }

    /// Approximate `spec` with line segments.
    ///
    /// Never fails: inconsistent input produces a geometrically wrong but
    /// finite path. With zero segments the result is `[position, target]`.
    /// Arcs needing more than [`max_segments`](Self::max_segments) chords
    /// are drawn with exactly that many.
    pub fn fractionize(&self, spec: &ArcSpec) -> FractionizedPath {
        let (a0, a1, linear) = spec.plane.indices();
        let travel = self.angular_travel(spec);
        let needed = self.segments_for(spec, travel);
        let segments = needed.min(self.max_segments);
        if segments < needed {
            warn!(
                "Arc needs {} segments, drawing {} instead",
                needed, segments
            );
        }

        let mut points = Vec::with_capacity(segments.max(1) + 1);
        points.push(spec.position);

        if segments > 0 {
            let center0 = spec.position[a0] + spec.center_offset[a0];
            let center1 = spec.position[a1] + spec.center_offset[a1];
            let o0 = spec.center_offset[a0];
            let o1 = spec.center_offset[a1];
            let theta_per_segment = travel / segments as f64;
            let linear_per_segment = (spec.target[linear] - spec.position[linear]) / segments as f64;

            let mut cursor = spec.position;
            for i in 1..segments {
                let (sin_ti, cos_ti) = (i as f64 * theta_per_segment).sin_cos();
                cursor[a0] = center0 - o0 * cos_ti + o1 * sin_ti;
                cursor[a1] = center1 - o0 * sin_ti - o1 * cos_ti;
                cursor[linear] += linear_per_segment;
                points.push(cursor);
            }
        }

        points.push(spec.target);
        trace!(
            "Fractionized arc: travel {:.6} rad, {} segments, {} points",
            travel,
            segments,
            points.len()
        );

        FractionizedPath { points, segments }
    }

    /// Check that both endpoints lie on a circle of `spec.radius` around
    /// the center, within the tolerance
    pub fn validate(&self, spec: &ArcSpec) -> Result<(), GeometryError> {
        if !(spec.radius.is_finite() && spec.radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius {
                radius: spec.radius,
            });
        }

        let (a0, a1, _) = spec.plane.indices();
        let center = spec.center();
        for (which, point) in [
            (ArcEndpoint::Start, spec.position),
            (ArcEndpoint::Target, spec.target),
        ] {
            let distance = (point[a0] - center[a0]).hypot(point[a1] - center[a1]);
            if !((distance - spec.radius).abs() <= self.tolerance) {
                return Err(GeometryError::InconsistentArc {
                    which,
                    distance,
                    radius: spec.radius,
                });
            }
        }

        Ok(())
    }

    /// Fractionize after applying the configured validation policy.
    ///
    /// Arcs needing more than [`max_segments`](Self::max_segments) chords
    /// fail with [`GeometryError::TooManySegments`] under every policy.
    pub fn fractionize_checked(&self, spec: &ArcSpec) -> Result<FractionizedPath, GeometryError> {
        let segments = self.segment_count(spec);
        if segments > self.max_segments {
            return Err(GeometryError::TooManySegments {
                segments,
                max: self.max_segments,
            });
        }

        match self.validation {
            ArcValidation::Off => {}
            ArcValidation::Warn => {
                if let Err(e) = self.validate(spec) {
                    warn!("Drawing inconsistent arc anyway: {}", e);
                }
            }
            ArcValidation::Strict => self.validate(spec)?,
        }
        Ok(self.fractionize(spec))
    }
}
