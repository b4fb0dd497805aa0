//! Raw host buffers to typed renders.
//!
//! Hosts hand over untyped byte buffers plus a little metadata (deep-color flag, row bytes,
//! width). The pixel format is inferred from that metadata and the bytes are reinterpreted as
//! channels of the matching type before the generic driver runs.

use crate::foundation::core::Origin;
use crate::foundation::error::{StretchError, StretchResult};
use crate::geometry::params::StretchParams;
use crate::pixel::buffer::{CHANNELS, ImageView, ImageViewMut};
use crate::pixel::channel::{Channel, PixelFormat};
use crate::render::{RenderSettings, render_stretch};

/// Shape of a host layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerLayout {
    pub width: usize,
    pub height: usize,
    /// Bytes from the start of one row to the next, padding included.
    pub row_bytes: usize,
    /// Whether the host marked the layer as more than 8 bits per channel.
    pub deep: bool,
}

impl LayerLayout {
    /// Tightly packed layout for `format`.
    pub fn packed(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            row_bytes: width * format.bytes_per_pixel(),
            deep: format != PixelFormat::Byte8,
        }
    }
}

impl PixelFormat {
    /// Best-effort format inference from host metadata.
    ///
    /// Not deep is 8-bit. Deep layers are told apart by bytes per pixel: 16 means float,
    /// anything else is taken as 16-bit. A zero-width layer cannot be measured and is treated
    /// as 8-bit.
    pub fn detect(layout: &LayerLayout) -> Self {
        if !layout.deep || layout.width == 0 {
            return Self::Byte8;
        }
        match layout.row_bytes / layout.width {
            16 => Self::Float32,
            _ => Self::Word16,
        }
    }
}

/// Read-only host layer.
#[derive(Clone, Copy, Debug)]
pub struct RawLayer<'a> {
    pub layout: LayerLayout,
    pub data: &'a [u8],
}

/// Writable host layer.
#[derive(Debug)]
pub struct RawLayerMut<'a> {
    pub layout: LayerLayout,
    pub data: &'a mut [u8],
}

/// Detect the pixel format of `src`, then render into `dst` with that specialization.
#[tracing::instrument(level = "debug", skip_all, fields(src = ?src.layout, dst = ?dst.layout))]
pub fn render_raw(
    src: RawLayer<'_>,
    dst: RawLayerMut<'_>,
    params: &StretchParams,
    origin: Origin,
    settings: &RenderSettings,
) -> StretchResult<PixelFormat> {
    let format = PixelFormat::detect(&src.layout);
    let dst_format = PixelFormat::detect(&dst.layout);
    if dst_format != format {
        return Err(StretchError::validation(format!(
            "source is {format:?} but destination is {dst_format:?}"
        )));
    }
    tracing::debug!(?format, "pixel format selected");

    match format {
        PixelFormat::Byte8 => render_as::<u8>(src, dst, params, origin, settings)?,
        PixelFormat::Word16 => render_as::<u16>(src, dst, params, origin, settings)?,
        PixelFormat::Float32 => render_as::<f32>(src, dst, params, origin, settings)?,
    }
    Ok(format)
}

fn render_as<C: Channel>(
    src: RawLayer<'_>,
    dst: RawLayerMut<'_>,
    params: &StretchParams,
    origin: Origin,
    settings: &RenderSettings,
) -> StretchResult<()> {
    let src_stride = channel_stride::<C>(&src.layout)?;
    let dst_stride = channel_stride::<C>(&dst.layout)?;

    let src_bytes = whole_channels::<C>(src.data);
    let copied: Vec<C>;
    let src_channels: &[C] = match bytemuck::try_cast_slice(src_bytes) {
        Ok(channels) => channels,
        Err(_) => {
            // Misaligned host memory; work from an aligned copy.
            copied = bytemuck::pod_collect_to_vec(src_bytes);
            &copied
        }
    };
    let src_view = ImageView::from_slice(
        src.layout.width,
        src.layout.height,
        src_stride,
        src_channels,
    )?;

    let (w, h) = (dst.layout.width, dst.layout.height);
    let dst_len = dst.data.len() - dst.data.len() % size_of::<C>();
    let dst_bytes = &mut dst.data[..dst_len];
    match bytemuck::try_cast_slice_mut::<u8, C>(dst_bytes) {
        Ok(channels) => {
            let dst_view = ImageViewMut::from_slice_mut(w, h, dst_stride, channels)?;
            render_stretch(src_view, dst_view, params, origin, settings)
        }
        Err(_) => {
            let mut scratch = bytemuck::pod_collect_to_vec::<u8, C>(dst_bytes);
            let dst_view = ImageViewMut::from_slice_mut(w, h, dst_stride, &mut scratch)?;
            render_stretch(src_view, dst_view, params, origin, settings)?;
            dst_bytes.copy_from_slice(bytemuck::cast_slice(&scratch));
            Ok(())
        }
    }
}

/// Row pitch in channel elements; row bytes must hold whole pixels.
fn channel_stride<C: Channel>(layout: &LayerLayout) -> StretchResult<usize> {
    let pixel_bytes = size_of::<C>() * CHANNELS;
    if layout.row_bytes % pixel_bytes != 0 {
        return Err(StretchError::validation(format!(
            "row bytes {} is not a multiple of the {pixel_bytes}-byte {:?} pixel",
            layout.row_bytes,
            C::FORMAT
        )));
    }
    Ok(layout.row_bytes / size_of::<C>())
}

fn whole_channels<C: Channel>(bytes: &[u8]) -> &[u8] {
    &bytes[..bytes.len() - bytes.len() % size_of::<C>()]
}

#[cfg(test)]
#[path = "../../tests/unit/render/dispatch.rs"]
mod tests;
