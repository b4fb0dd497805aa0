use crate::foundation::core::{Direction, Downsample, Point, Vec2};

/// Effective shifts below this many pixels render as a plain copy.
pub const MIN_EFFECTIVE_SHIFT: f64 = 0.01;

/// User-facing parameters of one stretch render. Immutable for the duration of a call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StretchParams {
    /// Pixel the cut line passes through, in source-image coordinates.
    pub anchor: [i32; 2],
    /// Direction of the cut line in degrees; any finite value, wrapped into `[0, 360)`.
    pub angle_deg: f64,
    /// Total shift in full-resolution pixels.
    pub shift: f64,
    pub direction: Direction,
    pub downsample: Downsample,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            anchor: [0, 0],
            angle_deg: 0.0,
            shift: 0.0,
            direction: Direction::Both,
            downsample: Downsample::default(),
        }
    }
}

/// Geometry derived once from [`StretchParams`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StretchGeometry {
    pub direction: Direction,
    pub anchor: Point,
    /// Unit vector along which content is displaced.
    pub perpendicular: Vec2,
    /// Unit vector along the cut line.
    pub parallel: Vec2,
    /// Displacement magnitude per moved side, in render pixels.
    pub effective_shift: f64,
    /// `perpendicular * effective_shift`.
    pub shift: Vec2,
}

impl StretchGeometry {
    pub fn new(params: &StretchParams) -> Self {
        let angle = normalize_angle(params.angle_deg).to_radians();
        let (sin, cos) = angle.sin_cos();
        let perpendicular = Vec2::new(-sin, cos);
        let parallel = Vec2::new(cos, sin);
        let effective_shift = effective_shift(params);

        Self {
            direction: params.direction,
            anchor: Point::new(f64::from(params.anchor[0]), f64::from(params.anchor[1])),
            perpendicular,
            parallel,
            effective_shift,
            shift: perpendicular * effective_shift,
        }
    }

    /// True when the render degenerates to a copy.
    pub fn is_identity(&self) -> bool {
        self.effective_shift < MIN_EFFECTIVE_SHIFT
    }

    /// Signed distance of `p` from the cut line, measured along the perpendicular.
    #[inline]
    pub fn distance(&self, p: Point) -> f64 {
        (p - self.anchor).dot(self.perpendicular)
    }

    /// Projection of `p` onto the cut line.
    #[inline]
    pub fn border_point(&self, p: Point) -> Point {
        self.anchor + self.parallel * (p - self.anchor).dot(self.parallel)
    }

    /// Translations content undergoes in this mode; the forward side moves by `+shift`.
    pub fn displacements(&self) -> Vec<Vec2> {
        match self.direction {
            Direction::Both => vec![self.shift, -self.shift],
            Direction::Forward => vec![self.shift],
            Direction::Backward => vec![-self.shift],
        }
    }
}

/// Wrap degrees into `[0, 360)`; non-finite input maps to 0.
pub fn normalize_angle(deg: f64) -> f64 {
    if !deg.is_finite() {
        tracing::warn!(angle = deg, "non-finite angle, using 0");
        return 0.0;
    }
    let a = deg % 360.0;
    let a = if a < 0.0 { a + 360.0 } else { a };
    // Tiny negative remainders round up to exactly 360.
    if a >= 360.0 { 0.0 } else { a }
}

/// Shift in render pixels for one displaced side: downsample-scaled and halved for
/// [`Direction::Both`]. Degenerate inputs collapse to 0, which renders as a copy.
pub fn effective_shift(params: &StretchParams) -> f64 {
    let Some(factor) = params.downsample.factor() else {
        tracing::warn!(
            downsample = ?params.downsample,
            "degenerate downsample ratio, treating shift as zero"
        );
        return 0.0;
    };
    let mut shift = params.shift / factor;
    if params.direction == Direction::Both {
        shift *= 0.5;
    }
    if !shift.is_finite() {
        tracing::warn!(shift = params.shift, "non-finite shift, treating as zero");
        return 0.0;
    }
    shift.max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/params.rs"]
mod tests;
