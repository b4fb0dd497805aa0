//! Host-encoded parameter values.

use crate::foundation::core::{Direction, Downsample};
use crate::geometry::params::StretchParams;

/// One unit in 16.16 fixed point.
const FIXED_ONE: f64 = 65536.0;

/// Parameter values exactly as a plugin host stores them.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostParams {
    /// Anchor point, 16.16 fixed point per axis.
    pub anchor: [i32; 2],
    /// Angle in degrees, 16.16 fixed point.
    pub angle: i32,
    /// Shift amount in full-resolution pixels.
    pub shift: f64,
    /// 1-based popup index: 1 Both, 2 Forward, 3 Backward.
    pub direction: i32,
    pub downsample: Downsample,
}

impl HostParams {
    /// Decode into engine parameters.
    ///
    /// The anchor keeps only its integer part. The angle keeps its fraction and is wrapped
    /// into `(-360, 360)`; the geometry normalizes it further. Unknown popup indices fall back
    /// to [`Direction::Both`].
    pub fn decode(&self) -> StretchParams {
        StretchParams {
            anchor: [self.anchor[0] >> 16, self.anchor[1] >> 16],
            angle_deg: (f64::from(self.angle) / FIXED_ONE) % 360.0,
            shift: self.shift,
            direction: Direction::from_popup(self.direction),
            downsample: self.downsample,
        }
    }

    /// Encode engine parameters the way a host would hand them over.
    pub fn encode(params: &StretchParams) -> Self {
        Self {
            anchor: [
                params.anchor[0].saturating_mul(1 << 16),
                params.anchor[1].saturating_mul(1 << 16),
            ],
            angle: to_fixed(params.angle_deg % 360.0),
            shift: params.shift,
            direction: params.direction.popup_index(),
            downsample: params.downsample,
        }
    }
}

fn to_fixed(v: f64) -> i32 {
    // Saturating float-to-int cast; NaN becomes 0.
    (v * FIXED_ONE).round() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/host/params.rs"]
mod tests;
