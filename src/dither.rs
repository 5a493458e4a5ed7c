//! Ordered dithering: threshold matrices and how luma is compared to them.
//!
//! A matrix only makes sense together with the luma scale it was built for.
//! The 4×4 Bayer matrix holds 16 levels and is compared against `Y / 16`;
//! the 16×16 Bayer matrix holds 256 levels and is compared against raw `Y`.
//! [`DitherConfig`] keeps the pair together so the two cannot be mixed up.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::error::BitmapError;

const BAYER_2X2: [[usize; 2]; 2] = [[0, 2], [3, 1]];

/// Bayer value at (`row`, `col`) of an `n`×`n` matrix, `n` a power of two.
///
/// Recursive construction: `M(2m) = B2(i/m, j/m) + 4 * M(m)(i mod m, j mod m)`.
const fn bayer_value(mut row: usize, mut col: usize, n: usize) -> u8 {
    let mut value = 0;
    let mut half = n / 2;
    let mut weight = 1;
    while half > 0 {
        value += weight * BAYER_2X2[row / half][col / half];
        row %= half;
        col %= half;
        half /= 2;
        weight *= 4;
    }
    value as u8
}

const fn bayer<const LEN: usize>(n: usize) -> [u8; LEN] {
    let mut out = [0u8; LEN];
    let mut i = 0;
    while i < LEN {
        out[i] = bayer_value(i / n, i % n, n);
        i += 1;
    }
    out
}

/// 4×4 Bayer matrix, row-major, levels 0..=15.
pub const BAYER_4X4: [u8; 16] = [0, 8, 2, 10, 12, 4, 14, 6, 3, 11, 1, 9, 15, 7, 13, 5];

/// 16×16 Bayer matrix, row-major, levels 0..=255.
pub const BAYER_16X16: [u8; 256] = bayer::<256>(16);

/// Spatially periodic threshold pattern, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdMatrix {
    values: Cow<'static, [u8]>,
    width: usize,
    height: usize,
}

impl ThresholdMatrix {
    /// Custom matrix; `values.len()` must equal `width * height`.
    pub fn new(values: Vec<u8>, width: usize, height: usize) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidMatrix(alloc::format!(
                "matrix is {width}x{height}"
            )));
        }
        if width.checked_mul(height) != Some(values.len()) {
            return Err(BitmapError::InvalidMatrix(alloc::format!(
                "{} values for a {width}x{height} matrix",
                values.len()
            )));
        }
        Ok(Self {
            values: Cow::Owned(values),
            width,
            height,
        })
    }

    pub fn bayer4() -> Self {
        Self {
            values: Cow::Borrowed(&BAYER_4X4),
            width: 4,
            height: 4,
        }
    }

    pub fn bayer16() -> Self {
        Self {
            values: Cow::Borrowed(&BAYER_16X16),
            width: 16,
            height: 16,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Threshold for image pixel (`x`, `y`); the matrix tiles the image.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> u8 {
        self.values[(y % self.height) * self.width + x % self.width]
    }
}

/// How luma is brought into the matrix's value range before comparing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LumaScale {
    /// Compare `Y` directly (matrix spans 0..=255).
    Full,
    /// Compare `Y / divisor` (integer division).
    Divided(u16),
}

impl LumaScale {
    #[inline]
    fn apply(self, luma: i32) -> i32 {
        match self {
            Self::Full => luma,
            Self::Divided(d) => luma / i32::from(d),
        }
    }
}

/// A threshold matrix paired with the luma scale it expects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DitherConfig {
    matrix: ThresholdMatrix,
    scale: LumaScale,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self::bayer4()
    }
}

impl DitherConfig {
    pub fn new(matrix: ThresholdMatrix, scale: LumaScale) -> Result<Self, BitmapError> {
        if scale == LumaScale::Divided(0) {
            return Err(BitmapError::InvalidMatrix("luma divisor is zero".into()));
        }
        Ok(Self { matrix, scale })
    }

    /// 4×4 Bayer against `Y / 16`.
    pub fn bayer4() -> Self {
        Self {
            matrix: ThresholdMatrix::bayer4(),
            scale: LumaScale::Divided(16),
        }
    }

    /// 16×16 Bayer against raw `Y`.
    pub fn bayer16() -> Self {
        Self {
            matrix: ThresholdMatrix::bayer16(),
            scale: LumaScale::Full,
        }
    }

    pub fn matrix(&self) -> &ThresholdMatrix {
        &self.matrix
    }

    pub fn scale(&self) -> LumaScale {
        self.scale
    }

    /// Whether the pixel at (`x`, `y`) with this luma becomes black: scaled
    /// luma strictly below the cell's threshold.
    #[inline]
    pub fn is_black(&self, luma: i32, x: usize, y: usize) -> bool {
        self.scale.apply(luma) < i32::from(self.matrix.threshold(x, y))
    }
}
