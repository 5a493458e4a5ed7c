//! 54-byte BMP header parsing: file header (14 bytes) + BITMAPINFOHEADER (40).
//!
//! Only the fields needed to walk an uncompressed 24-bit pixel area are read.
//! The height field is decoded as a two's-complement `i32`: a non-negative
//! value means rows are stored bottom-up, a negative value means top-down,
//! and the row count is the magnitude either way.

use crate::error::BitmapError;

/// Size of the fixed header every supported file starts with.
pub const HEADER_LEN: usize = 54;

const OFFSET_PIXEL_DATA: usize = 10;
const OFFSET_WIDTH: usize = 18;
const OFFSET_HEIGHT: usize = 22;
const OFFSET_BPP: usize = 28;
const OFFSET_COMPRESSION: usize = 30;

/// Image dimensions and on-disk row layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// Zero bytes appended to each stored row so it is a multiple of 4 long.
    pub row_padding: u32,
    /// Rows are stored from the visual bottom row to the visual top row.
    pub bottom_up: bool,
    /// Byte offset of the first pixel row in the file.
    pub pixel_offset: usize,
}

impl Geometry {
    /// Geometry for a 24-bit image whose pixels start right after the header.
    pub fn new(width: u32, height: u32, bottom_up: bool) -> Self {
        Self {
            width,
            height,
            row_padding: row_padding(width),
            bottom_up,
            pixel_offset: HEADER_LEN,
        }
    }

    /// Bytes per stored row, padding included.
    pub fn row_stride(&self) -> usize {
        self.width as usize * 3 + self.row_padding as usize
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Pixel-area bytes the decoder needs. The last row's padding carries no
    /// data and is not required to be present.
    pub fn required_bytes(&self) -> Result<usize, BitmapError> {
        if self.height == 0 {
            return Ok(0);
        }
        (self.width as usize)
            .checked_mul(3)
            .and_then(|last_row| {
                self.row_stride()
                    .checked_mul(self.height as usize - 1)?
                    .checked_add(last_row)
            })
            .ok_or(BitmapError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// `(4 - (width*3) mod 4) mod 4`
pub fn row_padding(width: u32) -> u32 {
    let rem = (u64::from(width) * 3 % 4) as u32;
    (4 - rem) % 4
}

fn read_i32_le(header: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        header[offset],
        header[offset + 1],
        header[offset + 2],
        header[offset + 3],
    ])
}

fn read_u32_le(header: &[u8], offset: usize) -> u32 {
    read_i32_le(header, offset) as u32
}

/// Parse the fixed header at the start of `data`.
pub(crate) fn parse_header(data: &[u8]) -> Result<Geometry, BitmapError> {
    let header = data.get(..HEADER_LEN).ok_or_else(|| {
        BitmapError::MalformedHeader(alloc::format!(
            "need {HEADER_LEN} header bytes, got {}",
            data.len()
        ))
    })?;

    if &header[0..2] != b"BM" {
        return Err(BitmapError::MalformedHeader("missing BM signature".into()));
    }

    let bpp = u16::from_le_bytes([header[OFFSET_BPP], header[OFFSET_BPP + 1]]);
    if bpp != 24 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "{bpp}-bit BMP (only 24-bit is supported)"
        )));
    }
    let compression = read_u32_le(header, OFFSET_COMPRESSION);
    if compression != 0 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "BMP compression type {compression} (only uncompressed is supported)"
        )));
    }

    let width = read_i32_le(header, OFFSET_WIDTH);
    if width <= 0 {
        return Err(BitmapError::MalformedHeader(alloc::format!(
            "BMP width is {width}"
        )));
    }

    // Sign bit of the height field's most significant byte.
    let bottom_up = header[OFFSET_HEIGHT + 3] & 0x80 == 0;
    let height = read_i32_le(header, OFFSET_HEIGHT).unsigned_abs();
    if height == 0 {
        return Err(BitmapError::MalformedHeader("BMP height is zero".into()));
    }

    let pixel_offset = (read_u32_le(header, OFFSET_PIXEL_DATA) as usize).max(HEADER_LEN);

    Ok(Geometry {
        width: width as u32,
        height,
        row_padding: row_padding(width as u32),
        bottom_up,
        pixel_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn header(width: i32, height: i32) -> Vec<u8> {
        let mut h = alloc::vec![0u8; HEADER_LEN];
        h[0] = b'B';
        h[1] = b'M';
        h[10..14].copy_from_slice(&54u32.to_le_bytes());
        h[14..18].copy_from_slice(&40u32.to_le_bytes());
        h[18..22].copy_from_slice(&width.to_le_bytes());
        h[22..26].copy_from_slice(&height.to_le_bytes());
        h[26..28].copy_from_slice(&1u16.to_le_bytes());
        h[28..30].copy_from_slice(&24u16.to_le_bytes());
        h
    }

    #[test]
    fn padding_makes_rows_multiple_of_four() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        for w in 1..64 {
            assert_eq!((w * 3 + row_padding(w)) % 4, 0);
        }
    }

    #[test]
    fn positive_height_is_bottom_up() {
        let g = parse_header(&header(3, 2)).unwrap();
        assert_eq!(g.width, 3);
        assert_eq!(g.height, 2);
        assert_eq!(g.row_padding, 3);
        assert!(g.bottom_up);
        assert_eq!(g.row_stride(), 12);
    }

    #[test]
    fn negative_height_is_top_down_magnitude() {
        let g = parse_header(&header(5, -7)).unwrap();
        assert_eq!(g.height, 7);
        assert!(!g.bottom_up);
    }

    #[test]
    fn short_header_is_malformed() {
        let h = header(1, 1);
        assert!(matches!(
            parse_header(&h[..53]),
            Err(BitmapError::MalformedHeader(_))
        ));
    }

    #[test]
    fn non_positive_dimensions_are_malformed() {
        assert!(matches!(
            parse_header(&header(0, 4)),
            Err(BitmapError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse_header(&header(-4, 4)),
            Err(BitmapError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse_header(&header(4, 0)),
            Err(BitmapError::MalformedHeader(_))
        ));
    }

    #[test]
    fn other_bit_depths_are_unsupported() {
        let mut h = header(2, 2);
        h[28..30].copy_from_slice(&32u16.to_le_bytes());
        assert!(matches!(
            parse_header(&h),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn compressed_files_are_unsupported() {
        let mut h = header(2, 2);
        h[30..34].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            parse_header(&h),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn larger_pixel_offset_is_honored() {
        let mut h = header(2, 2);
        h[10..14].copy_from_slice(&138u32.to_le_bytes());
        assert_eq!(parse_header(&h).unwrap().pixel_offset, 138);

        h[10..14].copy_from_slice(&0u32.to_le_bytes());
        assert_eq!(parse_header(&h).unwrap().pixel_offset, HEADER_LEN);
    }

    #[test]
    fn required_bytes_skips_final_padding() {
        let g = Geometry::new(3, 2, true);
        assert_eq!(g.required_bytes().unwrap(), 12 + 9);
    }
}
