use crate::foundation::core::{Origin, Rect};
use crate::geometry::params::{StretchGeometry, StretchParams};

/// Largest width or height of any buffer the engine renders into.
pub const MAX_DIMENSION: usize = 16384;

/// Overhangs smaller than this are rounding noise, not content.
const OVERHANG_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Margins {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Output buffer size and placement of the input inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExpansionPlan {
    pub margins: Margins,
    pub width: usize,
    pub height: usize,
}

impl ExpansionPlan {
    /// Plan that keeps the input size.
    pub fn identity(width: usize, height: usize) -> Self {
        Self {
            margins: Margins::default(),
            width,
            height,
        }
    }

    /// Offset of the input's top-left corner in the output buffer.
    pub fn origin(&self) -> Origin {
        Origin::new(self.margins.left as i32, self.margins.top as i32)
    }
}

/// How far the output must extend past a `width x height` input to hold every displaced pixel.
///
/// The input rectangle is translated by each displacement the direction mode produces and
/// the union of those rectangles with the input gives the output footprint. The result does
/// not depend on the anchor, so it over-approximates when the cut line is near an edge.
#[tracing::instrument(level = "debug", skip(params), fields(shift = params.shift, direction = ?params.direction))]
pub fn plan_expansion(params: &StretchParams, width: usize, height: usize) -> ExpansionPlan {
    let geometry = StretchGeometry::new(params);
    if geometry.is_identity() || width == 0 || height == 0 {
        return ExpansionPlan::identity(width, height);
    }

    let input = Rect::new(0.0, 0.0, width as f64, height as f64);
    let footprint = geometry
        .displacements()
        .into_iter()
        .fold(input, |acc, d| acc.union(input + d));

    let (left, right) = clamp_axis(
        overhang(-footprint.x0),
        overhang(footprint.x1 - input.x1),
        width,
        "horizontal",
    );
    let (top, bottom) = clamp_axis(
        overhang(-footprint.y0),
        overhang(footprint.y1 - input.y1),
        height,
        "vertical",
    );

    let margins = Margins {
        left,
        top,
        right,
        bottom,
    };
    let plan = ExpansionPlan {
        margins,
        width: width + (left + right) as usize,
        height: height + (top + bottom) as usize,
    };
    tracing::debug!(?margins, width = plan.width, height = plan.height, "expansion planned");
    plan
}

fn overhang(v: f64) -> u64 {
    // No single margin can exceed the ceiling; capping here keeps the sums below exact.
    let v = (v - OVERHANG_EPSILON).ceil();
    if v > 0.0 {
        v.min(MAX_DIMENSION as f64) as u64
    } else {
        0
    }
}

/// Shrink a pair of margins proportionally so `extent + lo + hi` fits [`MAX_DIMENSION`].
fn clamp_axis(lo: u64, hi: u64, extent: usize, axis: &str) -> (u32, u32) {
    let room = MAX_DIMENSION.saturating_sub(extent) as u64;
    let total = lo + hi;
    if total <= room {
        return (lo as u32, hi as u32);
    }
    tracing::warn!(
        axis,
        requested = total,
        available = room,
        "expansion exceeds the maximum buffer size, clamping margins"
    );
    let lo_kept = lo * room / total;
    (lo_kept as u32, (room - lo_kept) as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/expansion.rs"]
mod tests;
