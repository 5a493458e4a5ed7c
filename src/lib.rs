//! # zenbmpfx
//!
//! Decoder for uncompressed 24-bit BMP files with per-channel histograms and a
//! small set of luma-based pixel transforms.
//!
//! ## What it does
//!
//! - Parses the 54-byte BMP header (width, height, row order)
//! - Decodes the BGR pixel area into an RGB buffer, top row first, counting
//!   each channel's samples into 256-bucket histograms in the same pass
//! - Converts between RGB and YCbCr with fixed JFIF coefficients
//! - Transforms: identity, brightness scaling of luma, grayscale, ordered
//!   dithering with a 4×4 or 16×16 Bayer matrix
//! - Lays out the histograms as bars for a canvas of any size
//! - Encodes any RGB buffer back to a 24-bit BMP
//!
//! Transforms always return a new buffer; a decoded [`Bitmap`] is never
//! modified after decoding.
//!
//! ## Non-Goals
//!
//! - Compressed, palette, or non-24-bit BMP variants
//! - Animated or multi-frame formats
//! - Color management beyond the fixed conversion constants
//! - Windowing, input handling, or drawing to a screen
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpfx::{DecodeRequest, Transform, Unstoppable, DEFAULT_HISTOGRAM_CANVAS};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let geometry = zenbmpfx::probe(data)?;
//! println!("{}x{} bottom-up={}", geometry.width, geometry.height, geometry.bottom_up);
//!
//! let bitmap = DecodeRequest::new(data).decode(Unstoppable)?;
//! let gray = bitmap.render(&Transform::Grayscale);
//! let bars = bitmap.render_histogram(DEFAULT_HISTOGRAM_CANVAS)?;
//! # let _ = (gray, bars);
//! # Ok::<(), zenbmpfx::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod limits;
mod pixel;
mod view;

pub mod bmp;
pub mod color;
pub mod dither;
pub mod histogram;
pub mod transform;

// Re-exports
pub use bmp::{Geometry, RowOrder, encode_bmp};
pub use color::{YCbCr, rgb_to_ycbcr, ycbcr_to_rgb};
pub use decode::{Bitmap, DecodeRequest};
pub use dither::{DitherConfig, LumaScale, ThresholdMatrix};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use histogram::{
    ChannelHistograms, DEFAULT_HISTOGRAM_CANVAS, HistogramBars, HistogramLayout,
};
pub use limits::Limits;
pub use pixel::{Channel, PixelBuffer};
pub use transform::{DEFAULT_BRIGHTNESS_FACTOR, Transform};
pub use view::{Rendered, View};

/// Read only the header of a BMP file.
pub fn probe(data: &[u8]) -> Result<Geometry, BitmapError> {
    bmp::probe(data)
}

/// Decode a BMP held in memory.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Read and decode a `.bmp` file.
///
/// The extension check is case-insensitive; anything else is rejected as
/// [`BitmapError::UnsupportedVariant`] before the file is opened.
#[cfg(feature = "std")]
pub fn decode_file(path: impl AsRef<std::path::Path>) -> Result<Bitmap, BitmapError> {
    let path = path.as_ref();
    let is_bmp = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"));
    if !is_bmp {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "{} is not a .bmp file",
            path.display()
        )));
    }
    let data = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    decode(&data, Unstoppable)
}
