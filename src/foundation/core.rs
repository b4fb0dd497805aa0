pub use kurbo::{Point, Rect, Vec2};

/// Which side(s) of the cut line get displaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Both halves move apart symmetrically by half the shift each.
    #[default]
    Both,
    /// Only the half on the positive side of the perpendicular moves.
    Forward,
    /// Only the half on the negative side of the perpendicular moves.
    Backward,
}

impl Direction {
    /// Decode a 1-based popup index (1 = Both, 2 = Forward, 3 = Backward).
    ///
    /// Unknown indices fall back to [`Direction::Both`].
    pub fn from_popup(index: i32) -> Self {
        match index {
            2 => Self::Forward,
            3 => Self::Backward,
            _ => Self::Both,
        }
    }

    /// 1-based popup index for this direction.
    pub fn popup_index(self) -> i32 {
        match self {
            Self::Both => 1,
            Self::Forward => 2,
            Self::Backward => 3,
        }
    }
}

/// A rational scale factor as handed over by the host (`num / den`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Ratio {
    pub num: i32,
    pub den: u32, // zero is tolerated and treated as degenerate
}

impl Ratio {
    pub const ONE: Self = Self { num: 1, den: 1 };

    pub fn new(num: i32, den: u32) -> Self {
        Self { num, den }
    }

    /// `den / num`, i.e. how many full-resolution pixels one rendered pixel covers.
    ///
    /// `None` when either side is zero or the result is not a positive finite number.
    pub fn reduction(self) -> Option<f64> {
        if self.num == 0 || self.den == 0 {
            return None;
        }
        let r = f64::from(self.den) / f64::from(self.num);
        (r.is_finite() && r > 0.0).then_some(r)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::ONE
    }
}

/// Per-axis downsample ratios of the current render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Downsample {
    pub x: Ratio,
    pub y: Ratio,
}

impl Downsample {
    pub fn new(x: Ratio, y: Ratio) -> Self {
        Self { x, y }
    }

    /// Divisor that maps a full-resolution pixel distance to the current render resolution.
    ///
    /// The smaller of the two axis reductions is used so the shift never overshoots on the
    /// less reduced axis.
    pub fn factor(self) -> Option<f64> {
        Some(self.x.reduction()?.min(self.y.reduction()?))
    }
}

/// Offset of the input image inside the output buffer, in output pixels.
///
/// Output pixel `(ox, oy)` corresponds to input coordinate `(ox - x, oy - y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Origin {
    pub x: i32,
    pub y: i32,
}

impl Origin {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Input-image coordinate of an output pixel.
    pub fn to_input(self, x: usize, y: usize) -> Point {
        Point::new(
            x as f64 - f64::from(self.x),
            y as f64 - f64::from(self.y),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
