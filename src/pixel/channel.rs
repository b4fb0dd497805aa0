//! Native channel representations and their normalized float form.
//!
//! "Normalized" keeps the native scale: an 8-bit channel normalizes into `[0, 255]`, a 16-bit
//! channel into `[0, 32768]` and a float channel is passed through unchanged. Interpolation
//! happens in that space and [`Channel::from_normalized`] rounds and clamps on write-back.

use std::fmt;

/// Closed set of pixel formats the engine is specialized for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 8 bits per channel, `0..=255`.
    Byte8,
    /// 16 bits per channel, `0..=32768`.
    Word16,
    /// 32-bit float per channel, unclamped.
    Float32,
}

impl PixelFormat {
    /// Size of one ARGB pixel in bytes.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Byte8 => 4,
            Self::Word16 => 8,
            Self::Float32 => 16,
        }
    }
}

/// One channel of an ARGB pixel.
pub trait Channel:
    bytemuck::Pod + Default + PartialEq + Send + Sync + fmt::Debug + 'static
{
    /// Format tag of this channel type.
    const FORMAT: PixelFormat;

    /// Normalized value of a fully opaque alpha channel.
    const MAX: f32;

    /// Native value to normalized float. Total.
    fn to_normalized(self) -> f32;

    /// Normalized float back to the native value, rounding half-up and clamping. Total.
    fn from_normalized(v: f32) -> Self;
}

impl Channel for u8 {
    const FORMAT: PixelFormat = PixelFormat::Byte8;
    const MAX: f32 = 255.0;

    #[inline]
    fn to_normalized(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_normalized(v: f32) -> Self {
        // NaN saturates to 0 in the cast.
        (v.clamp(0.0, <Self as Channel>::MAX) + 0.5) as u8
    }
}

impl Channel for u16 {
    const FORMAT: PixelFormat = PixelFormat::Word16;
    const MAX: f32 = 32768.0;

    #[inline]
    fn to_normalized(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_normalized(v: f32) -> Self {
        (v.clamp(0.0, <Self as Channel>::MAX) + 0.5) as u16
    }
}

impl Channel for f32 {
    const FORMAT: PixelFormat = PixelFormat::Float32;
    const MAX: f32 = 1.0;

    #[inline]
    fn to_normalized(self) -> f32 {
        self
    }

    #[inline]
    fn from_normalized(v: f32) -> Self {
        v
    }
}

/// An ARGB pixel with channels of type `C`.
///
/// `Pixel<f32>` doubles as the normalized working value of every format.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pixel<C> {
    pub alpha: C,
    pub red: C,
    pub green: C,
    pub blue: C,
}

impl<C: Channel> Pixel<C> {
    pub fn new(alpha: C, red: C, green: C, blue: C) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Fully transparent pixel (every channel zero).
    pub fn transparent() -> Self {
        Self::default()
    }

    /// Read from four interleaved channels (`[a, r, g, b]`).
    #[inline]
    pub fn from_channels(ch: &[C]) -> Self {
        Self {
            alpha: ch[0],
            red: ch[1],
            green: ch[2],
            blue: ch[3],
        }
    }

    /// Write into four interleaved channels (`[a, r, g, b]`).
    #[inline]
    pub fn write_channels(self, ch: &mut [C]) {
        ch[0] = self.alpha;
        ch[1] = self.red;
        ch[2] = self.green;
        ch[3] = self.blue;
    }

    #[inline]
    pub fn normalized(self) -> Pixel<f32> {
        Pixel {
            alpha: self.alpha.to_normalized(),
            red: self.red.to_normalized(),
            green: self.green.to_normalized(),
            blue: self.blue.to_normalized(),
        }
    }

    #[inline]
    pub fn from_normalized(p: Pixel<f32>) -> Self {
        Self {
            alpha: C::from_normalized(p.alpha),
            red: C::from_normalized(p.red),
            green: C::from_normalized(p.green),
            blue: C::from_normalized(p.blue),
        }
    }
}

impl Pixel<f32> {
    /// Straight per-channel interpolation; `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            alpha: mix(self.alpha, other.alpha),
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/channel.rs"]
mod tests;
