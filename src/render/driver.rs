use crate::foundation::core::Point;
use crate::foundation::error::StretchResult;
use crate::geometry::classify::{Coverage, Region};
use crate::pixel::buffer::{CHANNELS, ImageViewMut};
use crate::pixel::channel::{Channel, Pixel};
use crate::render::context::RenderContext;
use crate::sample::{RowSampler, sample};

/// Render the output rows `first_row..first_row + band.height()` into `band`.
pub(crate) fn render_band<C: Channel>(
    ctx: &RenderContext<'_, C>,
    first_row: usize,
    mut band: ImageViewMut<'_, C>,
) -> StretchResult<()> {
    for local in 0..band.height() {
        render_row(ctx, first_row + local, band.row_mut(local));
    }
    Ok(())
}

/// Render output row `y`. `out` holds exactly `ctx.width` interleaved pixels.
pub(crate) fn render_row<C: Channel>(ctx: &RenderContext<'_, C>, y: usize, out: &mut [C]) {
    if ctx.geometry.is_identity() {
        copy_row(ctx, y, out);
    } else if let Some(region) = uniform_region(ctx, y) {
        render_uniform_row(ctx, y, region, out);
    } else {
        render_classified_row(ctx, y, out);
    }
}

/// The region of the whole row when both ends fall in the same unfeathered region and
/// that region reads a single source row.
///
/// `dist` is linear along a row and every region is an interval of `dist`, so the two
/// extremes decide for every pixel in between.
pub(crate) fn uniform_region<C: Channel>(ctx: &RenderContext<'_, C>, y: usize) -> Option<Region> {
    if ctx.width == 0 {
        return None;
    }
    let coverage_at = |x| {
        ctx.regions
            .coverage(ctx.geometry.distance(ctx.input_point(x, y)))
    };
    match (coverage_at(0), coverage_at(ctx.width - 1)) {
        (Coverage::Pure(a), Coverage::Pure(b)) if a == b && ctx.geometry.row_constant(a) => {
            Some(a)
        }
        _ => None,
    }
}

fn render_uniform_row<C: Channel>(
    ctx: &RenderContext<'_, C>,
    y: usize,
    region: Region,
    out: &mut [C],
) {
    let source_y = ctx.geometry.source_for(region, ctx.input_point(0, y)).y;
    let sampler = RowSampler::new(ctx.src, source_y);
    for (x, ch) in out.chunks_exact_mut(CHANNELS).enumerate() {
        let source_x = ctx.geometry.source_for(region, ctx.input_point(x, y)).x;
        Pixel::<C>::from_normalized(sampler.sample(ctx.interpolation, source_x))
            .write_channels(ch);
    }
}

fn render_classified_row<C: Channel>(ctx: &RenderContext<'_, C>, y: usize, out: &mut [C]) {
    for (x, ch) in out.chunks_exact_mut(CHANNELS).enumerate() {
        let p = ctx.input_point(x, y);
        let px = match ctx.regions.coverage(ctx.geometry.distance(p)) {
            Coverage::Pure(region) => sample_region(ctx, region, p),
            Coverage::Blend { lower, upper, t } => {
                sample_region(ctx, lower, p).lerp(sample_region(ctx, upper, p), t)
            }
        };
        Pixel::<C>::from_normalized(px).write_channels(ch);
    }
}

#[inline]
fn sample_region<C: Channel>(ctx: &RenderContext<'_, C>, region: Region, p: Point) -> Pixel<f32> {
    let s = ctx.geometry.source_for(region, p);
    sample(ctx.src, ctx.interpolation, s.x, s.y)
}

/// No-op render: the input row at the origin offset, transparent elsewhere.
fn copy_row<C: Channel>(ctx: &RenderContext<'_, C>, y: usize, out: &mut [C]) {
    out.fill(C::default());
    let Some(row) = ctx.src.row_at(y as i64 - i64::from(ctx.origin.y)) else {
        return;
    };
    let ox = i64::from(ctx.origin.x);
    let start = ox.max(0);
    let end = (ox + ctx.src.width() as i64).min(ctx.width as i64);
    if start >= end {
        return;
    }
    let dst = start as usize * CHANNELS..end as usize * CHANNELS;
    let src_start = (start - ox) as usize * CHANNELS;
    out[dst.clone()].copy_from_slice(&row[src_start..src_start + dst.len()]);
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
