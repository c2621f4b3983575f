//! GIF serialization of an edited frame sequence
//!
//! The encoder consumes the materialized sequence (GIF needs the first
//! frame's palette and dimensions up front) and refuses to touch the
//! filesystem until the whole file has been produced in memory, so a failed
//! encode never leaves a partial file behind.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::frame::Frame;

/// Error type for encode failures
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Nothing to write: the sequence holds zero frames
    #[error("frame sequence is empty, nothing to encode")]
    EmptySequence,
    /// GIF-level serialization failure
    #[error("GIF encoding failed: {0}")]
    Encoding(#[from] gif::EncodingError),
    /// Filesystem failure while writing the finished bytes
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a frame sequence into GIF bytes.
///
/// The first frame's palette becomes the global color table; any later
/// frame whose palette diverges carries a local one. A single frame becomes
/// a static GIF; two or more become an animation that loops forever, with
/// each frame's delay, disposal, and transparency carried through.
///
/// # Errors
///
/// Returns [`EncodeError::EmptySequence`] for zero frames, checked before
/// a single byte is produced.
pub fn encode_gif(frames: &[Frame]) -> Result<Vec<u8>, EncodeError> {
    let first = frames.first().ok_or(EncodeError::EmptySequence)?;

    let global_palette = first.palette.to_rgb_bytes();
    let mut bytes = Vec::new();
    {
        let mut encoder =
            gif::Encoder::new(&mut bytes, first.width, first.height, &global_palette)?;
        if frames.len() > 1 {
            encoder.set_repeat(gif::Repeat::Infinite)?;
        }
        for frame in frames {
            let mut out = gif::Frame::default();
            out.width = frame.width;
            out.height = frame.height;
            out.buffer = Cow::Borrowed(&frame.pixels);
            out.delay = frame.delay;
            out.dispose = frame.dispose;
            out.transparent = frame.transparent;
            if frame.palette != first.palette {
                out.palette = Some(frame.palette.to_rgb_bytes());
            }
            encoder.write_frame(&out)?;
        }
    }
    Ok(bytes)
}

/// Encode a frame sequence and write it to `path` in one shot.
///
/// Missing parent directories are created. The file is only created once
/// encoding has fully succeeded.
pub fn write_gif(frames: &[Frame], path: &Path) -> Result<(), EncodeError> {
    let bytes = encode_gif(frames)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::FrameIter;
    use crate::frame::Palette;
    use tempfile::tempdir;

    fn two_color_palette() -> Palette {
        Palette::new(vec![[10, 20, 30], [200, 210, 220]]).unwrap()
    }

    #[test]
    fn test_encode_empty_sequence_is_rejected() {
        let result = encode_gif(&[]);
        assert!(matches!(result, Err(EncodeError::EmptySequence)));
    }

    #[test]
    fn test_write_gif_empty_sequence_creates_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.gif");
        let result = write_gif(&[], &path);
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_encode_single_frame_round_trips() {
        let frame = Frame::new(2, 2, vec![0, 1, 1, 0], two_color_palette()).unwrap();
        let bytes = encode_gif(&[frame.clone()]).unwrap();

        let decoded: Vec<Frame> = FrameIter::new(&bytes[..])
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].pixels, frame.pixels);
        assert_eq!(decoded[0].palette, frame.palette);
    }

    #[test]
    fn test_encode_animation_round_trips() {
        let mut first = Frame::new(2, 1, vec![0, 1], two_color_palette()).unwrap();
        first.delay = 10;
        let mut second = Frame::new(2, 1, vec![1, 0], two_color_palette()).unwrap();
        second.delay = 25;

        let bytes = encode_gif(&[first, second]).unwrap();
        let decoded: Vec<Frame> = FrameIter::new(&bytes[..])
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].pixels, vec![0, 1]);
        assert_eq!(decoded[1].pixels, vec![1, 0]);
        assert_eq!(decoded[0].delay, 10);
        assert_eq!(decoded[1].delay, 25);
    }

    #[test]
    fn test_encode_divergent_palette_kept_per_frame() {
        let first = Frame::new(1, 1, vec![0], two_color_palette()).unwrap();
        let second_palette = Palette::new(vec![[99, 0, 0], [0, 99, 0]]).unwrap();
        let second = Frame::new(1, 1, vec![1], second_palette.clone()).unwrap();

        let bytes = encode_gif(&[first, second]).unwrap();
        let decoded: Vec<Frame> = FrameIter::new(&bytes[..])
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded[0].palette, two_color_palette());
        assert_eq!(decoded[1].palette, second_palette);
    }

    #[test]
    fn test_write_gif_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/out.gif");
        let frame = Frame::new(1, 1, vec![0], two_color_palette()).unwrap();
        write_gif(&[frame], &path).unwrap();
        assert!(path.exists());
    }
}
