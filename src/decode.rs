use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::{self, Geometry, RowOrder};
use crate::error::BitmapError;
use crate::histogram::{ChannelHistograms, HistogramBars, HistogramLayout};
use crate::limits::Limits;
use crate::pixel::PixelBuffer;
use crate::transform::Transform;
use crate::view::{Rendered, View};

/// Builder for decoding a BMP held in memory.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BitmapError> {
        let (geometry, pixels, histograms) = bmp::decode(self.data, self.limits, &stop)?;
        Ok(Bitmap {
            geometry,
            pixels,
            histograms,
        })
    }
}

/// A decoded image and its channel histograms.
///
/// Immutable once built. Every `render_*` call returns new data, so a shared
/// `&Bitmap` can serve any number of views, concurrently if need be.
#[derive(Clone, Debug)]
pub struct Bitmap {
    geometry: Geometry,
    pixels: PixelBuffer,
    histograms: ChannelHistograms,
}

impl Bitmap {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    /// Decoded pixels, row 0 at the visual top.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn histograms(&self) -> &ChannelHistograms {
        &self.histograms
    }

    /// Copy of the decoded image.
    pub fn render_original(&self) -> PixelBuffer {
        self.render(&Transform::Identity)
    }

    pub fn render(&self, transform: &Transform) -> PixelBuffer {
        log::trace!(
            "rendering {transform:?} for {}x{}",
            self.geometry.width,
            self.geometry.height
        );
        transform.apply(self.pixels.as_ref())
    }

    /// Histogram bars in three stacked bands.
    pub fn render_histogram(&self, canvas: (u32, u32)) -> Result<HistogramBars, BitmapError> {
        self.render_histogram_with(canvas, HistogramLayout::Stacked)
    }

    pub fn render_histogram_with(
        &self,
        canvas: (u32, u32),
        layout: HistogramLayout,
    ) -> Result<HistogramBars, BitmapError> {
        self.histograms.bars(canvas, layout)
    }

    /// Render one of the viewer's patterns. `canvas` only matters for
    /// [`View::Histogram`]; image views keep the image's own size.
    pub fn render_view(&self, view: View, canvas: (u32, u32)) -> Result<Rendered, BitmapError> {
        Ok(match view.transform() {
            Some(transform) => Rendered::Image(self.render(&transform)),
            None => Rendered::Histogram(self.render_histogram(canvas)?),
        })
    }

    /// Re-encode the decoded image as a 24-bit BMP.
    pub fn encode(&self, order: RowOrder, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        bmp::encode_bmp(self.pixels.as_ref(), order, &stop)
    }
}
