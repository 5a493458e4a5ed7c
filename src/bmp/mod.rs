//! Uncompressed 24-bit BMP: header parsing, pixel decoding, encoding.
//!
//! Use top-level [`crate::decode`], [`crate::decode_file`], [`crate::probe`]
//! and [`crate::encode_bmp`].

mod decode;
mod encode;
mod header;

pub use encode::{RowOrder, encode_bmp};
pub use header::{Geometry, HEADER_LEN, row_padding};

use crate::error::BitmapError;
use crate::histogram::ChannelHistograms;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;
use enough::Stop;
use imgref::ImgVec;

/// Parse only the header.
pub(crate) fn probe(data: &[u8]) -> Result<Geometry, BitmapError> {
    header::parse_header(data)
}

/// Decode a whole file into its pixel buffer and histograms.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<(Geometry, PixelBuffer, ChannelHistograms), BitmapError> {
    let geometry = header::parse_header(data)?;
    log::debug!(
        "BMP {}x{}, {}, row padding {}, pixels at {}",
        geometry.width,
        geometry.height,
        if geometry.bottom_up {
            "bottom-up"
        } else {
            "top-down"
        },
        geometry.row_padding,
        geometry.pixel_offset
    );
    if let Some(limits) = limits {
        limits.check(&geometry)?;
    }
    stop.check()?;
    let decoded = decode::decode_pixels(data, &geometry, stop)?;
    let pixels = ImgVec::new(
        decoded.pixels,
        geometry.width as usize,
        geometry.height as usize,
    );
    Ok((geometry, pixels, decoded.histograms))
}
