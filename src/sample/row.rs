use crate::pixel::buffer::{CHANNELS, ImageView};
use crate::pixel::channel::{Channel, Pixel};
use crate::sample::{ALPHA_THRESHOLD, EXACT_EPSILON, Interpolation};

/// Sampler bound to one fixed source Y coordinate.
///
/// Resolves the (at most two) source rows and the vertical weights once; [`RowSampler::sample`]
/// then only has to resolve X. The general samplers in [`crate::sample`] go through this type,
/// so a whole-row fast path and a per-pixel path produce identical pixels.
#[derive(Clone, Copy, Debug)]
pub struct RowSampler<'a, C> {
    width: i64,
    row0: Option<&'a [C]>,
    row1: Option<&'a [C]>,
    nearest: Option<&'a [C]>,
    fy: f32,
}

impl<'a, C: Channel> RowSampler<'a, C> {
    pub fn new(src: ImageView<'a, C>, y: f64) -> Self {
        let y0 = y.floor();
        let row = y0 as i64;
        Self {
            width: src.width() as i64,
            row0: src.row_at(row),
            row1: src.row_at(row + 1),
            nearest: src.row_at((y + 0.5).floor() as i64),
            fy: (y - y0) as f32,
        }
    }

    #[inline]
    pub fn sample(&self, interpolation: Interpolation, x: f64) -> Pixel<f32> {
        match interpolation {
            Interpolation::Nearest => self.sample_nearest(x),
            Interpolation::Bilinear => self.sample_bilinear(x),
        }
    }

    pub fn sample_nearest(&self, x: f64) -> Pixel<f32> {
        texel(self.nearest, self.width, (x + 0.5).floor() as i64)
            .map_or_else(Pixel::transparent, Pixel::normalized)
    }

    pub fn sample_bilinear(&self, x: f64) -> Pixel<f32> {
        let x0f = x.floor();
        let x0 = x0f as i64;
        let fx = (x - x0f) as f32;
        let fy = self.fy;

        if fx < EXACT_EPSILON && fy < EXACT_EPSILON {
            return texel(self.row0, self.width, x0)
                .map_or_else(Pixel::transparent, Pixel::normalized);
        }

        let mut acc = AlphaWeighted::default();
        acc.add(texel(self.row0, self.width, x0), (1.0 - fx) * (1.0 - fy));
        acc.add(texel(self.row0, self.width, x0 + 1), fx * (1.0 - fy));
        acc.add(texel(self.row1, self.width, x0), (1.0 - fx) * fy);
        acc.add(texel(self.row1, self.width, x0 + 1), fx * fy);
        acc.finish()
    }
}

#[inline]
fn texel<C: Channel>(row: Option<&[C]>, width: i64, x: i64) -> Option<Pixel<C>> {
    let row = row?;
    if x < 0 || x >= width {
        return None;
    }
    let start = x as usize * CHANNELS;
    Some(Pixel::from_channels(&row[start..start + CHANNELS]))
}

/// Accumulator for alpha-weighted bilinear filtering.
///
/// Color is weighted by `spatial weight * alpha fraction` so transparent neighbors cannot drag
/// their (usually black) color into the result. Neighbors below the alpha threshold add no color
/// or weight, but alpha is a plain spatial average over all of them.
#[derive(Default)]
struct AlphaWeighted {
    alpha: f32,
    red: f32,
    green: f32,
    blue: f32,
    weight: f32,
}

impl AlphaWeighted {
    #[inline]
    fn add<C: Channel>(&mut self, px: Option<Pixel<C>>, spatial: f32) {
        let Some(px) = px else {
            return;
        };
        let px = px.normalized();
        self.alpha += px.alpha * spatial;
        let coverage = px.alpha / C::MAX;
        if coverage <= ALPHA_THRESHOLD {
            return;
        }
        let w = spatial * coverage;
        self.red += px.red * w;
        self.green += px.green * w;
        self.blue += px.blue * w;
        self.weight += w;
    }

    #[inline]
    fn finish(self) -> Pixel<f32> {
        if self.weight <= ALPHA_THRESHOLD {
            return Pixel::transparent();
        }
        Pixel {
            alpha: self.alpha,
            red: self.red / self.weight,
            green: self.green / self.weight,
            blue: self.blue / self.weight,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/row.rs"]
mod tests;
