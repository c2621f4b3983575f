//! Lazy GIF frame decoding
//!
//! [`FrameIter`] walks a GIF byte stream one image block at a time and
//! yields full-canvas [`Frame`]s, compositing each block onto the logical
//! screen the way a viewer would (honoring transparency and the previous
//! frame's disposal method). The iterator is finite and non-restartable;
//! memory use stays proportional to one canvas.

use std::io::Read;

use gif::{ColorOutput, DecodeOptions, DisposalMethod};
use thiserror::Error;

use crate::frame::{Frame, Palette, PaletteError};

/// Error type for decode failures
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a well-formed GIF (bad header, truncated data)
    #[error("malformed GIF data: {0}")]
    Malformed(#[from] gif::DecodingError),
    /// The source could not be read
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    /// The source carries a color table we cannot represent
    #[error("unusable color table: {0}")]
    Palette(#[from] PaletteError),
}

/// A lazy, finite, non-restartable sequence of decoded frames.
///
/// Yields `Result<Frame, DecodeError>`; decoding stops permanently after
/// the first error or after the source signals end-of-sequence.
pub struct FrameIter<R: Read> {
    decoder: gif::Decoder<R>,
    width: u16,
    height: u16,
    global_palette: Palette,
    background: u8,
    canvas: Vec<u8>,
    // Disposal bookkeeping for the most recently blitted block
    prev_dispose: DisposalMethod,
    prev_rect: (usize, usize, usize, usize),
    saved_canvas: Option<Vec<u8>>,
    done: bool,
}

impl<R: Read> FrameIter<R> {
    /// Start decoding a GIF from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] if the stream does not begin with
    /// a valid GIF header and logical screen descriptor.
    pub fn new(reader: R) -> Result<Self, DecodeError> {
        let mut options = DecodeOptions::new();
        options.set_color_output(ColorOutput::Indexed);
        let decoder = options.read_info(reader)?;

        let width = decoder.width();
        let height = decoder.height();
        let global_palette = match decoder.global_palette() {
            Some(bytes) => Palette::from_rgb_bytes(bytes)?,
            None => Palette::default(),
        };
        let background = decoder.bg_color().unwrap_or(0) as u8;
        let canvas = vec![background; width as usize * height as usize];

        Ok(Self {
            decoder,
            width,
            height,
            global_palette,
            background,
            canvas,
            prev_dispose: DisposalMethod::Keep,
            prev_rect: (0, 0, 0, 0),
            saved_canvas: None,
            done: false,
        })
    }

    /// Logical screen dimensions as `(width, height)`
    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

impl<R: Read> Iterator for FrameIter<R> {
    type Item = Result<Frame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let sub = match self.decoder.read_next_frame() {
            Ok(Some(sub)) => sub,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        };

        // Dispose of the previous block before drawing this one
        let (px, py, pw, ph) = self.prev_rect;
        match self.prev_dispose {
            DisposalMethod::Background => {
                for y in py..py + ph {
                    let row = &mut self.canvas[y * self.width as usize..];
                    row[px..px + pw].fill(self.background);
                }
            }
            DisposalMethod::Previous => {
                if let Some(saved) = self.saved_canvas.take() {
                    self.canvas = saved;
                }
            }
            _ => {}
        }

        // Clamp the block rectangle to the logical screen
        let left = (sub.left as usize).min(self.width as usize);
        let top = (sub.top as usize).min(self.height as usize);
        let blit_w = (sub.width as usize).min(self.width as usize - left);
        let blit_h = (sub.height as usize).min(self.height as usize - top);

        if sub.dispose == DisposalMethod::Previous {
            self.saved_canvas = Some(self.canvas.clone());
        }

        for y in 0..blit_h {
            let src_row = &sub.buffer[y * sub.width as usize..];
            let dst_start = (top + y) * self.width as usize + left;
            let dst_row = &mut self.canvas[dst_start..dst_start + blit_w];
            match sub.transparent {
                Some(t) => {
                    for (dst, &src) in dst_row.iter_mut().zip(&src_row[..blit_w]) {
                        if src != t {
                            *dst = src;
                        }
                    }
                }
                None => dst_row.copy_from_slice(&src_row[..blit_w]),
            }
        }

        self.prev_dispose = sub.dispose;
        self.prev_rect = (left, top, blit_w, blit_h);

        let palette = match &sub.palette {
            Some(bytes) => match Palette::from_rgb_bytes(bytes) {
                Ok(palette) => palette,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            },
            None => self.global_palette.clone(),
        };

        Some(Ok(Frame {
            width: self.width,
            height: self.height,
            pixels: self.canvas.clone(),
            palette,
            delay: sub.delay,
            dispose: sub.dispose,
            transparent: sub.transparent,
        }))
    }
}
