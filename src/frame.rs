//! Frame and palette types for indexed animated images.

use gif::DisposalMethod;
use thiserror::Error;

/// An RGB triple of 8-bit channels.
pub type Rgb = [u8; 3];

/// Error type for palette and frame construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// More entries than an indexed image can address
    #[error("palette has {0} entries, maximum is 256")]
    TooLarge(usize),
    /// Raw byte data is not a whole number of RGB triples
    #[error("palette byte length {0} is not a multiple of 3")]
    RaggedBytes(usize),
    /// Pixel buffer does not match the frame dimensions
    #[error("pixel buffer length {len} does not match {width}x{height}")]
    BadPixelCount { len: usize, width: u16, height: u16 },
}

/// An ordered color table referenced by an indexed image's pixel indices.
///
/// Entry order is significant: it defines the index -> color mapping.
/// Holds at most [`Palette::MAX_COLORS`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Rgb>,
}

impl Palette {
    /// Maximum number of entries an 8-bit indexed image can address
    pub const MAX_COLORS: usize = 256;

    /// Create a palette from a list of RGB entries.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::TooLarge`] for more than 256 entries.
    pub fn new(entries: Vec<Rgb>) -> Result<Self, PaletteError> {
        if entries.len() > Self::MAX_COLORS {
            return Err(PaletteError::TooLarge(entries.len()));
        }
        Ok(Self { entries })
    }

    /// Create a palette from flat `[r, g, b, r, g, b, ...]` bytes,
    /// as stored in a GIF color table.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::RaggedBytes`] if the length is not a multiple
    /// of 3, or [`PaletteError::TooLarge`] for more than 256 triples.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Result<Self, PaletteError> {
        if bytes.len() % 3 != 0 {
            return Err(PaletteError::RaggedBytes(bytes.len()));
        }
        let entries: Vec<Rgb> = bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(entries)
    }

    /// Flatten the palette back into GIF color-table bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|rgb| rgb.iter().copied()).collect()
    }

    /// Number of color entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the palette has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The color entries in index order
    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    /// Mutable access for wholesale recoloring
    pub fn entries_mut(&mut self) -> &mut [Rgb] {
        &mut self.entries
    }
}

/// One displayed image of an animated GIF: a full-canvas grid of palette
/// indices plus the palette those indices resolve against.
///
/// Timing and disposal metadata from the source frame is carried through
/// edits unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Grid width in pixels
    pub width: u16,
    /// Grid height in pixels
    pub height: u16,
    /// Row-major palette indices, `width * height` entries
    pub pixels: Vec<u8>,
    /// The color table this frame's indices resolve against
    pub palette: Palette,
    /// Display time in hundredths of a second
    pub delay: u16,
    /// How this frame is disposed of before the next one is drawn
    pub dispose: DisposalMethod,
    /// Palette index treated as transparent, if any
    pub transparent: Option<u8>,
}

impl Frame {
    /// Create a frame with default timing metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::BadPixelCount`] if `pixels` does not hold
    /// exactly `width * height` entries.
    pub fn new(
        width: u16,
        height: u16,
        pixels: Vec<u8>,
        palette: Palette,
    ) -> Result<Self, PaletteError> {
        if pixels.len() != width as usize * height as usize {
            return Err(PaletteError::BadPixelCount { len: pixels.len(), width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
            palette,
            delay: 0,
            dispose: DisposalMethod::Keep,
            transparent: None,
        })
    }

    /// Frame dimensions as `(width, height)`
    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_from_rgb_bytes() {
        let palette = Palette::from_rgb_bytes(&[255, 0, 0, 0, 255, 0]).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.entries(), &[[255, 0, 0], [0, 255, 0]]);
    }

    #[test]
    fn test_palette_round_trips_bytes() {
        let bytes = vec![1, 2, 3, 4, 5, 6, 7, 8, 9];
        let palette = Palette::from_rgb_bytes(&bytes).unwrap();
        assert_eq!(palette.to_rgb_bytes(), bytes);
    }

    #[test]
    fn test_palette_rejects_ragged_bytes() {
        let result = Palette::from_rgb_bytes(&[1, 2, 3, 4]);
        assert_eq!(result, Err(PaletteError::RaggedBytes(4)));
    }

    #[test]
    fn test_palette_rejects_too_many_entries() {
        let entries = vec![[0u8, 0, 0]; 257];
        let result = Palette::new(entries);
        assert_eq!(result, Err(PaletteError::TooLarge(257)));
    }

    #[test]
    fn test_palette_accepts_max_entries() {
        let entries = vec![[0u8, 0, 0]; 256];
        assert!(Palette::new(entries).is_ok());
    }

    #[test]
    fn test_frame_new_validates_pixel_count() {
        let palette = Palette::new(vec![[0, 0, 0]]).unwrap();
        let result = Frame::new(3, 2, vec![0; 5], palette);
        assert_eq!(
            result.unwrap_err(),
            PaletteError::BadPixelCount { len: 5, width: 3, height: 2 }
        );
    }

    #[test]
    fn test_frame_new_defaults() {
        let palette = Palette::new(vec![[10, 20, 30]]).unwrap();
        let frame = Frame::new(2, 2, vec![0; 4], palette).unwrap();
        assert_eq!(frame.dimensions(), (2, 2));
        assert_eq!(frame.delay, 0);
        assert_eq!(frame.dispose, DisposalMethod::Keep);
        assert_eq!(frame.transparent, None);
    }
}
