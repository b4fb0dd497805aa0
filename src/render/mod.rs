//! Render entry points: validation, context setup and row dispatch.

pub(crate) mod context;
pub(crate) mod dispatch;
pub(crate) mod driver;
pub(crate) mod threading;

use crate::foundation::core::Origin;
use crate::foundation::error::{StretchError, StretchResult};
use crate::geometry::expansion::{ExpansionPlan, MAX_DIMENSION, plan_expansion};
use crate::geometry::params::StretchParams;
use crate::pixel::buffer::{Image, ImageView, ImageViewMut};
use crate::pixel::channel::Channel;
use crate::render::context::RenderContext;
use crate::render::threading::{RenderThreading, run_bands};
use crate::sample::Interpolation;

/// Per-call engine settings; independent of the stretch parameters themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub interpolation: Interpolation,
    pub threading: RenderThreading,
}

/// Render the stretched `src` into `dst`.
///
/// `origin` places the input inside the output: output pixel `(x, y)` looks at input
/// coordinate `(x - origin.x, y - origin.y)`. Every destination pixel is written; nothing
/// is written when validation fails.
#[tracing::instrument(
    skip_all,
    fields(
        format = ?C::FORMAT,
        src_w = src.width(),
        src_h = src.height(),
        dst_w = dst.width(),
        dst_h = dst.height(),
    )
)]
pub fn render_stretch<C: Channel>(
    src: ImageView<'_, C>,
    dst: ImageViewMut<'_, C>,
    params: &StretchParams,
    origin: Origin,
    settings: &RenderSettings,
) -> StretchResult<()> {
    check_dimensions("source", src.width(), src.height())?;
    check_dimensions("destination", dst.width(), dst.height())?;

    let ctx = RenderContext::new(src, params, origin, dst.width(), settings.interpolation);
    if ctx.geometry.is_identity() {
        tracing::debug!(
            effective_shift = ctx.geometry.effective_shift,
            "shift below threshold, copying input"
        );
    }
    run_bands(dst, &settings.threading, |first_row, band| {
        driver::render_band(&ctx, first_row, band)
    })
}

/// Plan the expanded output for `src`, allocate it and render into it.
pub fn render_expanded<C: Channel>(
    src: ImageView<'_, C>,
    params: &StretchParams,
    settings: &RenderSettings,
) -> StretchResult<(Image<C>, ExpansionPlan)> {
    let plan = plan_expansion(params, src.width(), src.height());
    let mut out = Image::new(plan.width, plan.height)?;
    render_stretch(src, out.as_view_mut(), params, plan.origin(), settings)?;
    Ok((out, plan))
}

/// Render into a buffer the size of `src`, without expansion.
pub fn render_same_size<C: Channel>(
    src: ImageView<'_, C>,
    params: &StretchParams,
    settings: &RenderSettings,
) -> StretchResult<Image<C>> {
    let mut out = Image::new(src.width(), src.height())?;
    render_stretch(src, out.as_view_mut(), params, Origin::default(), settings)?;
    Ok(out)
}

fn check_dimensions(what: &str, width: usize, height: usize) -> StretchResult<()> {
    if width == 0 || height == 0 {
        return Err(StretchError::validation(format!(
            "{what} buffer is empty ({width}x{height})"
        )));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(StretchError::validation(format!(
            "{what} buffer {width}x{height} exceeds the {MAX_DIMENSION} pixel limit"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/render.rs"]
mod tests;
