//! Strided ARGB image views.
//!
//! Views are over interleaved channel slices: pixel `(x, y)` lives at
//! `data[y * stride + 4 * x..][..4]`. `stride` is measured in channel elements and may exceed
//! `4 * width`, so host buffers with row padding can be borrowed without copying. The last row
//! does not need trailing padding.

use crate::foundation::error::{StretchError, StretchResult};
use crate::pixel::channel::{Channel, Pixel};

/// Channels per pixel (alpha, red, green, blue).
pub const CHANNELS: usize = 4;

/// Owned, contiguous ARGB image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<C> {
    width: usize,
    height: usize,
    data: Vec<C>,
}

impl<C: Channel> Image<C> {
    /// All-transparent image.
    pub fn new(width: usize, height: usize) -> StretchResult<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| StretchError::validation("image size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![C::default(); len],
        })
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<C>) -> StretchResult<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| StretchError::validation("image size overflow"))?;
        if data.len() != expected {
            return Err(StretchError::validation(format!(
                "image data length mismatch: expected {expected}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image filled with one pixel value.
    pub fn filled(width: usize, height: usize, px: Pixel<C>) -> StretchResult<Self> {
        let mut img = Self::new(width, height)?;
        for ch in img.data.chunks_exact_mut(CHANNELS) {
            px.write_channels(ch);
        }
        Ok(img)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[C] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel<C>> {
        self.as_view().pixel(x, y)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, px: Pixel<C>) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let start = (y * self.width + x) * CHANNELS;
        px.write_channels(&mut self.data[start..start + CHANNELS]);
        true
    }

    pub fn as_view(&self) -> ImageView<'_, C> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width * CHANNELS,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, C> {
        ImageViewMut {
            width: self.width,
            height: self.height,
            stride: self.width * CHANNELS,
            data: &mut self.data,
        }
    }
}

/// Borrowed, read-only ARGB view.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, C> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [C],
}

impl<'a, C: Channel> ImageView<'a, C> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [C],
    ) -> StretchResult<Self> {
        check_layout(width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row pitch in channel elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Interleaved channels of row `y` (`4 * width` elements).
    pub fn row(&self, y: usize) -> &'a [C] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * CHANNELS]
    }

    /// Row `y` for signed coordinates; `None` outside the image.
    #[inline]
    pub fn row_at(&self, y: i64) -> Option<&'a [C]> {
        if y < 0 || y >= self.height as i64 {
            return None;
        }
        Some(self.row(y as usize))
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel<C>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y * self.stride + x * CHANNELS;
        self.data
            .get(start..start + CHANNELS)
            .map(Pixel::from_channels)
    }

    /// Pixel at signed coordinates; `None` outside the image.
    #[inline]
    pub fn pixel_at(&self, x: i64, y: i64) -> Option<Pixel<C>> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixel(x as usize, y as usize)
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width * CHANNELS
    }
}

/// Borrowed, writable ARGB view.
#[derive(Debug)]
pub struct ImageViewMut<'a, C> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a mut [C],
}

impl<'a, C: Channel> ImageViewMut<'a, C> {
    pub fn from_slice_mut(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a mut [C],
    ) -> StretchResult<Self> {
        check_layout(width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &[C] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * CHANNELS]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [C] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &mut self.data[start..start + self.width * CHANNELS]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel<C>> {
        self.as_view().pixel(x, y)
    }

    pub fn as_view(&self) -> ImageView<'_, C> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: self.data,
        }
    }

    /// Overwrite every pixel (padding untouched).
    pub fn fill(&mut self, px: Pixel<C>) {
        for y in 0..self.height {
            for ch in self.row_mut(y).chunks_exact_mut(CHANNELS) {
                px.write_channels(ch);
            }
        }
    }

    /// Split into disjoint bands of at most `rows_per_band` rows, top to bottom.
    ///
    /// Returns `(first_row, band)` pairs; every row belongs to exactly one band.
    pub fn split_rows(self, rows_per_band: usize) -> Vec<(usize, ImageViewMut<'a, C>)> {
        let rows_per_band = rows_per_band.max(1);
        let mut out = Vec::with_capacity(self.height.div_ceil(rows_per_band));
        let Self {
            width,
            height,
            stride,
            mut data,
        } = self;

        let mut first_row = 0;
        while first_row < height {
            let rows = rows_per_band.min(height - first_row);
            let split = (rows * stride).min(data.len());
            let (head, tail) = std::mem::take(&mut data).split_at_mut(split);
            out.push((
                first_row,
                ImageViewMut {
                    width,
                    height: rows,
                    stride,
                    data: head,
                },
            ));
            data = tail;
            first_row += rows;
        }
        out
    }
}

fn check_layout(width: usize, height: usize, stride: usize, len: usize) -> StretchResult<()> {
    let row_len = width
        .checked_mul(CHANNELS)
        .ok_or_else(|| StretchError::validation("image width overflow"))?;
    if stride < row_len {
        return Err(StretchError::validation(format!(
            "invalid stride: {stride} < {row_len}"
        )));
    }
    let min_len = min_required_len(row_len, height, stride)
        .ok_or_else(|| StretchError::validation("image size overflow"))?;
    if len < min_len {
        return Err(StretchError::validation(format!(
            "buffer too short: expected at least {min_len}, got {len}"
        )));
    }
    Ok(())
}

fn min_required_len(row_len: usize, height: usize, stride: usize) -> Option<usize> {
    if row_len == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(row_len)
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/buffer.rs"]
mod tests;
