//! Pixel transforms over a decoded image.
//!
//! Every transform reads its source and returns a fresh buffer of the same
//! size. Sources are never written, so any number of transforms can run on
//! one decoded image, in any order or from several threads.

use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::RGB8;

use crate::color::{luma, rgb_to_ycbcr, ycbcr_to_rgb};
use crate::dither::DitherConfig;
use crate::pixel::PixelBuffer;

/// Luma multiplier used by [`Transform::brighten`].
pub const DEFAULT_BRIGHTNESS_FACTOR: f64 = 1.5;

const BLACK: RGB8 = RGB8::new(0, 0, 0);
const WHITE: RGB8 = RGB8::new(255, 255, 255);

/// A pure image-to-image operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Transform {
    Identity,
    /// Scale luma by `factor`, keep chroma.
    Brighten { factor: f64 },
    /// Replace each pixel with its luma.
    Grayscale,
    /// Black/white by ordered dithering of luma.
    Dither(DitherConfig),
}

impl Transform {
    /// Brighten by [`DEFAULT_BRIGHTNESS_FACTOR`].
    pub fn brighten() -> Self {
        Self::Brighten {
            factor: DEFAULT_BRIGHTNESS_FACTOR,
        }
    }

    /// Dither with the 4×4 Bayer matrix.
    pub fn dither() -> Self {
        Self::Dither(DitherConfig::bayer4())
    }

    pub fn apply(&self, src: ImgRef<'_, RGB8>) -> PixelBuffer {
        match self {
            Self::Identity => identity(src),
            Self::Brighten { factor } => brighten(src, *factor),
            Self::Grayscale => grayscale(src),
            Self::Dither(config) => dither(src, config),
        }
    }
}

fn map_pixels(
    src: ImgRef<'_, RGB8>,
    mut f: impl FnMut(usize, usize, RGB8) -> RGB8,
) -> PixelBuffer {
    let mut out = Vec::with_capacity(src.width() * src.height());
    for (y, row) in src.rows().enumerate() {
        out.extend(row.iter().enumerate().map(|(x, &px)| f(x, y, px)));
    }
    ImgVec::new(out, src.width(), src.height())
}

/// Unchanged copy of `src`.
pub fn identity(src: ImgRef<'_, RGB8>) -> PixelBuffer {
    map_pixels(src, |_, _, px| px)
}

/// `min(trunc(factor * y), 255)`, never negative.
#[inline]
pub fn scale_luma(y: i32, factor: f64) -> i32 {
    ((factor * f64::from(y)) as i32).clamp(0, 255)
}

pub fn brighten_pixel(px: RGB8, factor: f64) -> RGB8 {
    let mut c = rgb_to_ycbcr(px);
    c.y = scale_luma(c.y, factor);
    ycbcr_to_rgb(c)
}

pub fn brighten(src: ImgRef<'_, RGB8>, factor: f64) -> PixelBuffer {
    map_pixels(src, |_, _, px| brighten_pixel(px, factor))
}

pub fn grayscale_pixel(px: RGB8) -> RGB8 {
    let y = luma(px) as u8;
    RGB8::new(y, y, y)
}

pub fn grayscale(src: ImgRef<'_, RGB8>) -> PixelBuffer {
    map_pixels(src, |_, _, px| grayscale_pixel(px))
}

pub fn dither(src: ImgRef<'_, RGB8>, config: &DitherConfig) -> PixelBuffer {
    map_pixels(src, |x, y, px| {
        if config.is_black(luma(px), x, y) {
            BLACK
        } else {
            WHITE
        }
    })
}
