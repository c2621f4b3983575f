//! gifwork - Library for editing animated indexed GIFs
//!
//! This library provides functionality to:
//! - Decode a GIF into a lazy sequence of full-canvas indexed frames
//! - Resize frame grids with index-preserving nearest-neighbor sampling
//! - Rotate or set the hue of frame palettes without touching pixel indices
//! - Re-encode the edited frames as a static or animated GIF

pub mod cli;
pub mod decode;
pub mod encode;
pub mod frame;
pub mod hsv;
pub mod ops;
pub mod pipeline;
