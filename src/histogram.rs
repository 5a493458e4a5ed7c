//! Per-channel histograms and their reduction to drawable bar geometry.
//!
//! Histograms are filled while the pixel area is decoded. The aggregator turns
//! them into 256 bars per channel for a canvas of a given size: each channel's
//! tallest bar fills `1 / HEADROOM` of its band, with a fixed horizontal
//! margin on both sides and a fixed vertical reserve below the bands.

use rgb::RGB8;

use crate::error::BitmapError;
use crate::pixel::Channel;

/// Number of buckets per channel (one per 8-bit sample value).
pub const BUCKETS: usize = 256;

/// Left and right margin of the bar area, in canvas pixels.
pub const HISTOGRAM_MARGIN: u32 = 30;

/// Canvas height left below the bands, in canvas pixels.
pub const HISTOGRAM_RESERVE: u32 = 100;

/// Band height divided by the tallest bar height.
pub const HEADROOM: f64 = 1.2;

/// Canvas size the histogram view is drawn at when the shell has no
/// preference.
pub const DEFAULT_HISTOGRAM_CANVAS: (u32, u32) = (1084, 700);

/// Sample counts for the red, green, and blue channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelHistograms {
    counts: [[u64; BUCKETS]; 3],
}

impl Default for ChannelHistograms {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelHistograms {
    pub fn new() -> Self {
        Self {
            counts: [[0; BUCKETS]; 3],
        }
    }

    /// Count one pixel: one increment per channel.
    #[inline]
    pub fn record(&mut self, px: RGB8) {
        let [r, g, b] = &mut self.counts;
        r[usize::from(px.r)] += 1;
        g[usize::from(px.g)] += 1;
        b[usize::from(px.b)] += 1;
    }

    /// Build histograms from an existing pixel slice.
    pub fn from_pixels<'a>(pixels: impl IntoIterator<Item = &'a RGB8>) -> Self {
        let mut h = Self::new();
        for &px in pixels {
            h.record(px);
        }
        h
    }

    pub fn channel(&self, channel: Channel) -> &[u64; BUCKETS] {
        &self.counts[channel.index()]
    }

    /// Sum of all buckets; equals the pixel count of the image.
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().sum()
    }

    pub fn max(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().copied().max().unwrap_or(0)
    }

    /// Lay out bars for a `canvas` of `(width, height)` pixels.
    pub fn bars(
        &self,
        canvas: (u32, u32),
        layout: HistogramLayout,
    ) -> Result<HistogramBars, BitmapError> {
        aggregate(self, canvas, layout)
    }
}

/// How the three channel histograms share the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistogramLayout {
    /// Three equal bands, red on top, blue at the bottom.
    #[default]
    Stacked,
    /// One band; the three channels overlap.
    Shared,
}

/// One histogram bucket as a filled rectangle. `top + height` is the
/// baseline of the channel's band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bar {
    pub x: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Bars of one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelBars {
    pub channel: Channel,
    /// Canvas row the bars stand on.
    pub baseline: u32,
    /// Canvas pixels per counted sample.
    pub scale: f64,
    pub bars: [Bar; BUCKETS],
}

impl ChannelBars {
    pub fn heights(&self) -> [u32; BUCKETS] {
        core::array::from_fn(|i| self.bars[i].height)
    }
}

/// Bars for all three channels, in red, green, blue order.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramBars {
    pub canvas: (u32, u32),
    pub layout: HistogramLayout,
    pub channels: [ChannelBars; 3],
}

impl HistogramBars {
    pub fn channel(&self, channel: Channel) -> &ChannelBars {
        &self.channels[channel.index()]
    }
}

/// Reduce three histograms to bar geometry for a canvas.
///
/// Fails with [`BitmapError::EmptyHistogram`] when a channel has no samples,
/// since its scale would be a division by zero.
pub fn aggregate(
    histograms: &ChannelHistograms,
    canvas: (u32, u32),
    layout: HistogramLayout,
) -> Result<HistogramBars, BitmapError> {
    let (canvas_w, canvas_h) = canvas;
    let usable_h = canvas_h.saturating_sub(HISTOGRAM_RESERVE);
    let band = match layout {
        HistogramLayout::Stacked => usable_h / 3,
        HistogramLayout::Shared => usable_h,
    };
    let bar_width = f64::from(canvas_w.saturating_sub(2 * HISTOGRAM_MARGIN)) / BUCKETS as f64;

    let mut maxes = [0u64; 3];
    for channel in Channel::ALL {
        let max = histograms.max(channel);
        if max == 0 {
            return Err(BitmapError::EmptyHistogram { channel });
        }
        maxes[channel.index()] = max;
    }

    let channels = core::array::from_fn(|idx| {
        let channel = Channel::ALL[idx];
        let baseline = match layout {
            HistogramLayout::Stacked => band * (idx as u32 + 1),
            HistogramLayout::Shared => band,
        };
        let scale = f64::from(band) / HEADROOM / maxes[idx] as f64;
        let counts = histograms.channel(channel);
        let bars = core::array::from_fn(|i| {
            let height = (scale * counts[i] as f64) as u32;
            Bar {
                x: (f64::from(HISTOGRAM_MARGIN) + bar_width * i as f64) as u32,
                top: baseline.saturating_sub(height),
                width: bar_width as u32,
                height,
            }
        });
        ChannelBars {
            channel,
            baseline,
            scale,
            bars,
        }
    });

    log::debug!(
        "histogram layout {layout:?} on {canvas_w}x{canvas_h} canvas, band height {band}"
    );

    Ok(HistogramBars {
        canvas,
        layout,
        channels,
    })
}
