//! 24-bit pixel area decoder.
//!
//! One pass over the stored rows fills the RGB buffer in visual order
//! (row 0 on top) and counts every sample into the channel histograms.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGB8;

use super::header::Geometry;
use crate::error::BitmapError;
use crate::histogram::ChannelHistograms;

/// Forward-only reader over the file bytes. Never substitutes data for
/// bytes past the end.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn truncated(&self, wanted: usize) -> BitmapError {
        BitmapError::TruncatedStream {
            needed: self.pos.saturating_add(wanted),
            actual: self.data.len(),
        }
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self.pos.checked_add(n).ok_or_else(|| self.truncated(n))?;
        if new_pos > self.data.len() {
            return Err(self.truncated(n));
        }
        self.pos = new_pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let data = self.data;
        let bytes = data
            .get(self.pos..)
            .and_then(|rest| rest.first_chunk::<N>())
            .ok_or_else(|| self.truncated(N))?;
        self.pos += N;
        Ok(*bytes)
    }
}

/// Decoded pixels (visual order, row-major) and their histograms.
#[derive(Debug)]
pub(crate) struct DecodedPixels {
    pub pixels: Vec<RGB8>,
    pub histograms: ChannelHistograms,
}

/// Decode the pixel area described by `geometry` from the whole file `data`.
pub(crate) fn decode_pixels(
    data: &[u8],
    geometry: &Geometry,
    stop: &dyn Stop,
) -> Result<DecodedPixels, BitmapError> {
    let needed = geometry.required_bytes()?;
    let available = data.len().saturating_sub(geometry.pixel_offset);
    if available < needed {
        return Err(BitmapError::TruncatedStream {
            needed,
            actual: available,
        });
    }

    let w = geometry.width as usize;
    let h = geometry.height as usize;
    let pixel_count = w.checked_mul(h).ok_or(BitmapError::DimensionsTooLarge {
        width: geometry.width,
        height: geometry.height,
    })?;
    let padding = geometry.row_padding as usize;

    let mut pixels = vec![RGB8::default(); pixel_count];
    let mut histograms = ChannelHistograms::new();
    let mut cursor = Cursor::new(data, geometry.pixel_offset);

    for disk_row in 0..h {
        if disk_row % 16 == 0 {
            stop.check()?;
        }
        // Bottom-up files store the visual bottom row first.
        let row = if geometry.bottom_up {
            h - 1 - disk_row
        } else {
            disk_row
        };
        for px in &mut pixels[row * w..(row + 1) * w] {
            let [b, g, r] = cursor.read_fixed_bytes::<3>()?;
            *px = RGB8::new(r, g, b);
            histograms.record(*px);
        }
        if disk_row + 1 < h {
            cursor.skip(padding)?;
        }
    }

    log::trace!(
        "decoded {}x{} pixel area, {} bytes consumed",
        geometry.width,
        geometry.height,
        cursor.pos - geometry.pixel_offset
    );

    Ok(DecodedPixels { pixels, histograms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Channel;
    use enough::Unstoppable;

    fn file_with(geometry: &Geometry, pixel_area: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; geometry.pixel_offset];
        data.extend_from_slice(pixel_area);
        data
    }

    #[test]
    fn bottom_up_rows_are_flipped() {
        let g = Geometry::new(2, 2, true);
        // Disk row 0 (visual bottom), then disk row 1 (visual top); 2 bytes padding each.
        let area = [
            1, 2, 3, 4, 5, 6, 0, 0, //
            7, 8, 9, 10, 11, 12, 0, 0,
        ];
        let out = decode_pixels(&file_with(&g, &area), &g, &Unstoppable).unwrap();
        assert_eq!(
            out.pixels,
            [
                RGB8::new(9, 8, 7),
                RGB8::new(12, 11, 10),
                RGB8::new(3, 2, 1),
                RGB8::new(6, 5, 4),
            ]
        );
    }

    #[test]
    fn top_down_rows_keep_order() {
        let g = Geometry::new(1, 2, false);
        let area = [1, 2, 3, 0, 4, 5, 6, 0];
        let out = decode_pixels(&file_with(&g, &area), &g, &Unstoppable).unwrap();
        assert_eq!(out.pixels, [RGB8::new(3, 2, 1), RGB8::new(6, 5, 4)]);
    }

    #[test]
    fn padding_is_not_counted() {
        let g = Geometry::new(3, 2, true);
        assert_eq!(g.row_padding, 3);
        let mut area = Vec::new();
        for _ in 0..2 {
            area.extend_from_slice(&[10, 20, 30, 10, 20, 30, 10, 20, 30]);
            area.extend_from_slice(&[99, 99, 99]);
        }
        let out = decode_pixels(&file_with(&g, &area), &g, &Unstoppable).unwrap();
        assert!(out.pixels.iter().all(|&p| p == RGB8::new(30, 20, 10)));
        assert_eq!(out.histograms.channel(Channel::Red)[30], 6);
        assert_eq!(out.histograms.channel(Channel::Blue)[99], 0);
        for c in Channel::ALL {
            assert_eq!(out.histograms.total(c), 6);
        }
    }

    #[test]
    fn final_row_padding_may_be_missing() {
        let g = Geometry::new(1, 2, true);
        let area = [1, 2, 3, 0, 4, 5, 6];
        assert!(decode_pixels(&file_with(&g, &area), &g, &Unstoppable).is_ok());
    }

    #[test]
    fn short_pixel_area_is_truncated() {
        let g = Geometry::new(2, 2, true);
        let area = [0u8; 13];
        let err = decode_pixels(&file_with(&g, &area), &g, &Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::TruncatedStream {
                needed: 14,
                actual: 13
            }
        ));
    }

    #[test]
    fn cursor_refuses_reads_past_end() {
        let data = [1u8, 2];
        let mut c = Cursor::new(&data, 0);
        assert!(c.read_fixed_bytes::<3>().is_err());
        assert_eq!(c.read_fixed_bytes::<2>().unwrap(), [1, 2]);
        assert!(c.skip(1).is_err());

        let mut past = Cursor::new(&data, 10);
        assert!(past.read_fixed_bytes::<1>().is_err());
    }
}
