use crate::foundation::core::{Origin, Point};
use crate::geometry::classify::RegionMap;
use crate::geometry::params::{StretchGeometry, StretchParams};
use crate::pixel::buffer::ImageView;
use crate::pixel::channel::Channel;
use crate::sample::Interpolation;

/// Read-only snapshot shared by every row worker of one render call.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RenderContext<'a, C> {
    pub src: ImageView<'a, C>,
    pub geometry: StretchGeometry,
    pub regions: RegionMap,
    pub origin: Origin,
    /// Output width in pixels.
    pub width: usize,
    pub interpolation: Interpolation,
}

impl<'a, C: Channel> RenderContext<'a, C> {
    pub fn new(
        src: ImageView<'a, C>,
        params: &StretchParams,
        origin: Origin,
        width: usize,
        interpolation: Interpolation,
    ) -> Self {
        let geometry = StretchGeometry::new(params);
        Self {
            src,
            geometry,
            regions: RegionMap::new(&geometry),
            origin,
            width,
            interpolation,
        }
    }

    /// Input-space coordinate of output pixel `(x, y)`.
    #[inline]
    pub fn input_point(&self, x: usize, y: usize) -> Point {
        self.origin.to_input(x, y)
    }
}
