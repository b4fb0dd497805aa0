//! Stretch tears an image apart along a line and fills the tear with streaks of the border.
//!
//! A cut line passes through an anchor point at a given angle. Pixels on one or both sides of
//! the line are displaced along its perpendicular; the band opened between them is filled by
//! projecting every pixel back onto the line. The engine is a pure function from a source
//! buffer plus [`StretchParams`] to a destination buffer:
//!
//! - [`plan_expansion`] sizes an output large enough to keep displaced content
//! - [`render_stretch`] renders into a caller-provided strided buffer
//! - [`render_raw`] does the same for untyped host layers, picking 8-bit, 16-bit or float
//! - [`StretchEffect`] wraps it all behind the command set a plugin host drives
#![forbid(unsafe_code)]

mod foundation;
mod geometry;
mod host;
mod pixel;
mod render;
mod sample;

pub use crate::foundation::core::{Direction, Downsample, Origin, Point, Ratio, Rect, Vec2};
pub use crate::foundation::error::{Status, StretchError, StretchResult};

pub use crate::geometry::classify::{Coverage, FEATHER, Region, RegionMap};
pub use crate::geometry::expansion::{ExpansionPlan, MAX_DIMENSION, Margins, plan_expansion};
pub use crate::geometry::params::{
    MIN_EFFECTIVE_SHIFT, StretchGeometry, StretchParams, effective_shift, normalize_angle,
};
pub use crate::host::command::{
    Command, DESCRIPTION, GlobalInfo, NAME, PARAMS, ParamDecl, ParamKind, Response,
    StretchEffect, VERSION, Version, about_text,
};
pub use crate::host::params::HostParams;
pub use crate::pixel::buffer::{CHANNELS, Image, ImageView, ImageViewMut};
pub use crate::pixel::channel::{Channel, Pixel, PixelFormat};
pub use crate::render::dispatch::{LayerLayout, RawLayer, RawLayerMut, render_raw};
pub use crate::render::threading::{MAX_WORKERS, RenderThreading};
pub use crate::render::{RenderSettings, render_expanded, render_same_size, render_stretch};
pub use crate::sample::{
    ALPHA_THRESHOLD, EXACT_EPSILON, Interpolation, RowSampler, sample, sample_bilinear,
    sample_nearest,
};
