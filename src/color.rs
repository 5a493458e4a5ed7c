//! RGB ↔ YCbCr (JFIF coefficients, truncating float-to-int casts).
//!
//! The two directions are not exact inverses: forward conversion truncates
//! toward zero and the inverse clamps each channel to `0..=255` on its own,
//! so a round trip may drift by a few levels.

use rgb::RGB8;

/// Luma/chroma triple. Components are plain integers and may leave
/// `0..=255` after adjustment; [`ycbcr_to_rgb`] clamps on the way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct YCbCr {
    pub y: i32,
    pub cb: i32,
    pub cr: i32,
}

impl YCbCr {
    pub const fn new(y: i32, cb: i32, cr: i32) -> Self {
        Self { y, cb, cr }
    }
}

/// Chroma midpoint added to Cb and Cr.
const CHROMA_OFFSET: i32 = 128;

pub fn rgb_to_ycbcr(px: RGB8) -> YCbCr {
    let (r, g, b) = (f64::from(px.r), f64::from(px.g), f64::from(px.b));
    YCbCr {
        y: (0.299 * r + 0.587 * g + 0.114 * b) as i32,
        cb: (-0.1687 * r - 0.3313 * g + 0.5 * b) as i32 + CHROMA_OFFSET,
        cr: (0.5 * r - 0.4187 * g - 0.0813 * b) as i32 + CHROMA_OFFSET,
    }
}

/// Luma only; same value as `rgb_to_ycbcr(px).y`.
#[inline]
pub fn luma(px: RGB8) -> i32 {
    (0.299 * f64::from(px.r) + 0.587 * f64::from(px.g) + 0.114 * f64::from(px.b)) as i32
}

pub fn ycbcr_to_rgb(c: YCbCr) -> RGB8 {
    let y = f64::from(c.y);
    let cb = f64::from(c.cb - CHROMA_OFFSET);
    let cr = f64::from(c.cr - CHROMA_OFFSET);

    let r = (y + 1.402 * cr) as i32;
    let g = (y - 0.34414 * cb - 0.71414 * cr) as i32;
    let b = (y + 1.772 * cb) as i32;

    RGB8::new(clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(rgb_to_ycbcr(RGB8::new(0, 0, 0)), YCbCr::new(0, 128, 128));
        assert_eq!(
            rgb_to_ycbcr(RGB8::new(255, 255, 255)),
            YCbCr::new(255, 128, 128)
        );
        // 0.299 * 255 = 76.245; -0.1687 * 255 = -43.0185 truncates to -43
        assert_eq!(rgb_to_ycbcr(RGB8::new(255, 0, 0)), YCbCr::new(76, 85, 255));
    }

    #[test]
    fn negative_chroma_truncates_toward_zero() {
        // -0.3313 * 1 = -0.3313 -> 0, not -1
        assert_eq!(rgb_to_ycbcr(RGB8::new(0, 1, 0)).cb, 128);
    }

    #[test]
    fn luma_matches_full_conversion() {
        for v in (0..=255u8).step_by(5) {
            let px = RGB8::new(v, 255 - v, v / 2);
            assert_eq!(luma(px), rgb_to_ycbcr(px).y);
        }
    }

    #[test]
    fn inverse_clamps_each_channel() {
        assert_eq!(
            ycbcr_to_rgb(YCbCr::new(300, 128, 128)),
            RGB8::new(255, 255, 255)
        );
        assert_eq!(ycbcr_to_rgb(YCbCr::new(-20, 128, 128)), RGB8::new(0, 0, 0));
        let px = ycbcr_to_rgb(YCbCr::new(128, 255, 0));
        assert_eq!(px.r, 0);
        assert_eq!(px.b, 255);
    }

    #[test]
    fn gray_round_trips_exactly() {
        for v in 0..=255u8 {
            let px = RGB8::new(v, v, v);
            let back = ycbcr_to_rgb(rgb_to_ycbcr(px));
            assert!(back.r.abs_diff(v) <= 1, "{v} -> {back:?}");
            assert!(back.g.abs_diff(v) <= 1, "{v} -> {back:?}");
            assert!(back.b.abs_diff(v) <= 1, "{v} -> {back:?}");
        }
    }
}
