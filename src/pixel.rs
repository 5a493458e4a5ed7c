use imgref::ImgVec;
use rgb::RGB8;

/// Decoded or transformed image: interleaved RGB, row 0 is the visual top.
pub type PixelBuffer = ImgVec<RGB8>;

/// One color channel of an RGB image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Channels in histogram/band order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position in `[red, green, blue]` arrays.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// Sample of this channel in `px`.
    pub fn sample(self, px: RGB8) -> u8 {
        match self {
            Self::Red => px.r,
            Self::Green => px.g,
            Self::Blue => px.b,
        }
    }
}
