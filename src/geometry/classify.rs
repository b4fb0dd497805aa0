//! Region classification along the perpendicular axis.
//!
//! Every mode splits the `dist` axis into three consecutive intervals:
//! `below | gap | above`. The lower and upper boundaries and the classes on either side
//! depend on the direction mode:
//!
//! | mode     | below            | lower  | upper | above            |
//! |----------|------------------|--------|-------|------------------|
//! | Both     | Backward         | `-eff` | `eff` | Forward          |
//! | Forward  | Unchanged        | `0`    | `eff` | Forward          |
//! | Backward | Backward         | `-eff` | `0`   | Unchanged        |
//!
//! Each boundary carries a feather band of half-width [`FEATHER`] in which the two adjacent
//! classes are blended linearly.

use crate::foundation::core::{Direction, Point};
use crate::geometry::params::StretchGeometry;

/// Half-width, in pixels, of the blend band at each region boundary.
pub const FEATHER: f64 = 0.5;

/// Where a pixel takes its color from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Sampled in place.
    Unchanged,
    /// Sampled from the projection onto the cut line.
    Gap,
    /// Content moved along `+perpendicular`; sampled at `p - shift`.
    Forward,
    /// Content moved along `-perpendicular`; sampled at `p + shift`.
    Backward,
}

/// Result of classifying one distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coverage {
    Pure(Region),
    /// Inside a feather band: `lower` weighted `1 - t`, `upper` weighted `t`.
    Blend { lower: Region, upper: Region, t: f32 },
}

/// Boundaries and classes of one render, derived from [`StretchGeometry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionMap {
    pub lower: f64,
    pub upper: f64,
    pub feather: f64,
    pub below: Region,
    pub above: Region,
}

impl RegionMap {
    pub fn new(geometry: &StretchGeometry) -> Self {
        let eff = geometry.effective_shift;
        let (lower, upper, below, above) = match geometry.direction {
            Direction::Both => (-eff, eff, Region::Backward, Region::Forward),
            Direction::Forward => (0.0, eff, Region::Unchanged, Region::Forward),
            Direction::Backward => (-eff, 0.0, Region::Backward, Region::Unchanged),
        };
        // Narrow gaps shrink the feather so the two bands never overlap.
        let feather = FEATHER.min((upper - lower) * 0.5);
        Self {
            lower,
            upper,
            feather,
            below,
            above,
        }
    }

    /// Hard classification, without feathering.
    pub fn region(&self, dist: f64) -> Region {
        // With one side unchanged, the moved side owns its boundary; in Both mode the gap
        // owns both.
        let below = if self.above == Region::Unchanged {
            dist <= self.lower
        } else {
            dist < self.lower
        };
        if below {
            return self.below;
        }
        let above = if self.below == Region::Unchanged {
            dist >= self.upper
        } else {
            dist > self.upper
        };
        if above { self.above } else { Region::Gap }
    }

    /// Classification with feather bands applied.
    pub fn coverage(&self, dist: f64) -> Coverage {
        let f = self.feather;
        if f <= 0.0 {
            return Coverage::Pure(self.region(dist));
        }
        if dist < self.lower - f {
            return Coverage::Pure(self.below);
        }
        if dist <= self.lower + f {
            return Coverage::Blend {
                lower: self.below,
                upper: Region::Gap,
                t: blend_t(dist, self.lower, f),
            };
        }
        if dist < self.upper - f {
            return Coverage::Pure(Region::Gap);
        }
        if dist <= self.upper + f {
            return Coverage::Blend {
                lower: Region::Gap,
                upper: self.above,
                t: blend_t(dist, self.upper, f),
            };
        }
        Coverage::Pure(self.above)
    }
}

#[inline]
fn blend_t(dist: f64, boundary: f64, feather: f64) -> f32 {
    ((dist - (boundary - feather)) / (2.0 * feather)).clamp(0.0, 1.0) as f32
}

impl StretchGeometry {
    /// Source coordinate a pixel at `p` reads from when it belongs to `region`.
    #[inline]
    pub fn source_for(&self, region: Region, p: Point) -> Point {
        match region {
            Region::Unchanged => p,
            Region::Gap => self.border_point(p),
            Region::Forward => p - self.shift,
            Region::Backward => p + self.shift,
        }
    }

    /// Whether every pixel of an output row in `region` reads from a single source row.
    pub fn row_constant(&self, region: Region) -> bool {
        match region {
            Region::Unchanged | Region::Forward | Region::Backward => true,
            Region::Gap => self.parallel.y.abs() < 1e-9,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/classify.rs"]
mod tests;
