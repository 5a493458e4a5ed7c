use crate::histogram::HistogramBars;
use crate::pixel::PixelBuffer;
use crate::transform::Transform;

/// The display patterns a viewer cycles through, in cycle order.
///
/// The engine holds no view state; a shell keeps the current `View` and
/// advances it with [`View::next`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Original,
    Histogram,
    Brighter,
    Grayscale,
    Dither,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Original,
        View::Histogram,
        View::Brighter,
        View::Grayscale,
        View::Dither,
    ];

    /// Following view, wrapping back to [`View::Original`].
    pub fn next(self) -> Self {
        match self {
            Self::Original => Self::Histogram,
            Self::Histogram => Self::Brighter,
            Self::Brighter => Self::Grayscale,
            Self::Grayscale => Self::Dither,
            Self::Dither => Self::Original,
        }
    }

    /// Pixel transform behind this view; `None` for the histogram.
    pub fn transform(self) -> Option<Transform> {
        match self {
            Self::Original => Some(Transform::Identity),
            Self::Histogram => None,
            Self::Brighter => Some(Transform::brighten()),
            Self::Grayscale => Some(Transform::Grayscale),
            Self::Dither => Some(Transform::dither()),
        }
    }
}

/// Output of one view.
#[derive(Clone, Debug)]
pub enum Rendered {
    Image(PixelBuffer),
    Histogram(HistogramBars),
}

impl Rendered {
    /// Canvas size the output is meant to be shown at.
    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Image(img) => (img.width() as u32, img.height() as u32),
            Self::Histogram(bars) => bars.canvas,
        }
    }
}
