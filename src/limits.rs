use crate::bmp::Geometry;
use crate::error::BitmapError;

/// Resource caps applied after the header is parsed and before the pixel
/// buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded RGB buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Validate a parsed geometry against every configured cap.
    pub(crate) fn check(&self, geometry: &Geometry) -> Result<(), BitmapError> {
        let (width, height) = (geometry.width, geometry.height);
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        let pixels = geometry.pixel_count();
        if let Some(max_px) = self.max_pixels {
            if pixels > max_px {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        if let Some(max_mem) = self.max_memory_bytes {
            // RGB8 is three bytes per pixel
            let bytes = pixels.saturating_mul(3);
            if bytes > max_mem {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
