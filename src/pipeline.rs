//! The decode -> transform -> encode pipeline for one input file
//!
//! Frames flow one way and one at a time: the decoder yields lazily, the
//! transform maps each frame as it is pulled, and the encoder materializes
//! the sequence at an explicit collect boundary (GIF needs the frame count
//! and first palette before anything can be written). Each input file runs
//! the full pipeline to completion or fails outright; there are no retries
//! and no partially written outputs.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::{DecodeError, FrameIter};
use crate::encode::{write_gif, EncodeError};
use crate::frame::Frame;
use crate::ops::{FrameOp, OpError};

/// Error type covering every stage of the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Op(#[from] OpError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The source decoded to zero frames
    #[error("image has no frames")]
    EmptySequence,
    /// The input path has no usable file name for the output
    #[error("input path has no file name")]
    BadInputPath,
}

/// Run the full pipeline for one input file.
///
/// Decodes `input`, applies `op` to every frame in order, and writes the
/// result into `out_dir` under the input's file name. Returns the path of
/// the written file.
///
/// # Errors
///
/// Any stage failure aborts this input: [`DecodeError`] for malformed
/// sources, [`OpError`] for invalid transform parameters,
/// [`PipelineError::EmptySequence`] when the source has no frames (raised
/// strictly before any write), and [`EncodeError`] for output failures.
pub fn run_pipeline(
    input: &Path,
    out_dir: &Path,
    op: &FrameOp,
) -> Result<PathBuf, PipelineError> {
    let file_name = input.file_name().ok_or(PipelineError::BadInputPath)?;
    let out_path = out_dir.join(file_name);

    // Decoding feeds Transforming lazily, one frame at a time
    let file = File::open(input).map_err(DecodeError::Io)?;
    let decoder = FrameIter::new(BufReader::new(file))?;
    let edited: Vec<Frame> = decoder
        .map(|result| {
            result
                .map_err(PipelineError::from)
                .and_then(|frame| op.apply(frame).map_err(PipelineError::from))
        })
        .collect::<Result<_, _>>()?;

    // Checked here as well as in the encoder so no write can begin
    if edited.is_empty() {
        return Err(PipelineError::EmptySequence);
    }

    write_gif(&edited, &out_path)?;
    Ok(out_path)
}
