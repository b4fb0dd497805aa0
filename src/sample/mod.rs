//! Point sampling of ARGB sources at fractional coordinates.
//!
//! Integer coordinates address pixel centers. Anything outside the source reads as fully
//! transparent; there is no clamping or wrapping.

pub(crate) mod row;

use crate::pixel::buffer::ImageView;
use crate::pixel::channel::{Channel, Pixel};

pub use row::RowSampler;

/// Alpha fraction at or below which a neighbor is ignored by the bilinear filter.
pub const ALPHA_THRESHOLD: f32 = 0.001;

/// Fractional offsets below this are treated as exactly on a pixel center.
pub const EXACT_EPSILON: f32 = 0.001;

/// Interpolation used when reading the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Round to the nearest pixel. Crisp edges, never blends with neighbors.
    Nearest,
    /// Alpha-weighted bilinear over the 2x2 neighborhood.
    #[default]
    Bilinear,
}

/// Sample `src` at `(x, y)`, returning normalized channels.
#[inline]
pub fn sample<C: Channel>(
    src: ImageView<'_, C>,
    interpolation: Interpolation,
    x: f64,
    y: f64,
) -> Pixel<f32> {
    RowSampler::new(src, y).sample(interpolation, x)
}

pub fn sample_nearest<C: Channel>(src: ImageView<'_, C>, x: f64, y: f64) -> Pixel<f32> {
    RowSampler::new(src, y).sample_nearest(x)
}

pub fn sample_bilinear<C: Channel>(src: ImageView<'_, C>, x: f64, y: f64) -> Pixel<f32> {
    RowSampler::new(src, y).sample_bilinear(x)
}

#[cfg(test)]
#[path = "../../tests/unit/sample/sample.rs"]
mod tests;
