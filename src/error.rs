use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, transforms, histogram layout, and encoding.
///
/// Every variant is terminal for the current load attempt: the caller gets
/// no partially decoded image.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("unsupported bitmap variant: {0}")]
    UnsupportedVariant(String),

    #[error("truncated pixel data: need {needed} bytes, got {actual}")]
    TruncatedStream { needed: usize, actual: usize },

    #[error("histogram for {channel:?} channel is empty")]
    EmptyHistogram { channel: crate::Channel },

    #[error("invalid threshold matrix: {0}")]
    InvalidMatrix(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
