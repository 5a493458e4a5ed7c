//! BMP encoder: uncompressed 24-bit, either row order.

use alloc::vec::Vec;

use enough::Stop;
use imgref::ImgRef;
use rgb::RGB8;

use super::header::{HEADER_LEN, row_padding};
use crate::error::BitmapError;

/// Order rows are written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// Visual bottom row first; positive height field. What most writers emit.
    #[default]
    BottomUp,
    /// Visual top row first; negative height field.
    TopDown,
}

/// Encode an RGB image as a 24-bit BMP file.
pub fn encode_bmp(
    img: ImgRef<'_, RGB8>,
    order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let (w, h) = (img.width(), img.height());
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u32::try_from(w).unwrap_or(u32::MAX),
        height: u32::try_from(h).unwrap_or(u32::MAX),
    };
    let width = i32::try_from(w).map_err(|_| too_large())?;
    let height = i32::try_from(h).map_err(|_| too_large())?;
    if width == 0 || height == 0 {
        return Err(BitmapError::MalformedHeader(alloc::format!(
            "cannot encode a {w}x{h} image"
        )));
    }

    let pad_bytes = row_padding(width as u32) as usize;
    let row_stride = w
        .checked_mul(3)
        .and_then(|r| r.checked_add(pad_bytes))
        .ok_or_else(too_large)?;
    let pixel_data_size = row_stride.checked_mul(h).ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(HEADER_LEN)
        .filter(|&s| u32::try_from(s).is_ok())
        .ok_or_else(too_large)?;

    let mut out = Vec::with_capacity(file_size);
    let height_field = match order {
        RowOrder::BottomUp => height,
        RowOrder::TopDown => -height,
    };
    write_bmp_header(
        &mut out,
        file_size as u32,
        pixel_data_size as u32,
        width,
        height_field,
    );

    match order {
        RowOrder::BottomUp => write_rows(&mut out, img.rows().rev(), pad_bytes, stop)?,
        RowOrder::TopDown => write_rows(&mut out, img.rows(), pad_bytes, stop)?,
    }

    Ok(out)
}

fn write_rows<'a>(
    out: &mut Vec<u8>,
    rows: impl Iterator<Item = &'a [RGB8]>,
    pad_bytes: usize,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    for (i, row) in rows.enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }
    Ok(())
}

fn write_bmp_header(
    out: &mut Vec<u8>,
    file_size: u32,
    pixel_data_size: u32,
    width: i32,
    height_field: i32,
) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes()); // data offset

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height_field.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bpp
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
