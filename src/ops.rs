//! Frame transforms: geometric resizing and palette recoloring
//!
//! Every transform maps one frame to one frame. The two families touch
//! disjoint data: resize ops rebuild the index grid and dimensions and never
//! look at color data; recolor ops rewrite the palette and never look at the
//! grid. Each op is plain configuration captured at construction and applied
//! functionally per frame.

use thiserror::Error;

use crate::frame::Frame;
use crate::hsv::{set_palette_hue, shift_palette_hue, HUE_UNITS};

/// Error type for transform construction and application failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpError {
    /// A target dimension is zero, negative, or beyond what GIF can encode
    #[error("invalid target dimension {0}, must be between 1 and 65535")]
    InvalidDimension(i64),
    /// Out-of-range or conflicting configuration
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Recolor requested on a frame without an indexed palette
    #[error("frame has no palette, recoloring needs indexed color data")]
    UnsupportedPalette,
}

/// Geometric transforms: rebuild the index grid at new dimensions.
///
/// The palette passes through untouched. Resampling is nearest-neighbor
/// index selection: the output cell at `(x, y)` copies the input index at
/// `(x * src_w / dst_w, y * src_h / dst_h)` using integer floor division,
/// so no cell ever holds a blended (and potentially out-of-range) index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOp {
    /// Target grid is exactly `width` x `height`
    Exact { width: u16, height: u16 },
    /// Fixed width; height derived per frame from that frame's aspect ratio
    AspectWidth(u16),
    /// Fixed height; width derived per frame from that frame's aspect ratio
    AspectHeight(u16),
    /// Independent scale factors per axis
    ScaleExact { width_scale: f64, height_scale: f64 },
    /// One scale factor for both axes
    ScaleAspect(f64),
}

impl ResizeOp {
    /// Exact target dimensions.
    pub fn exact(width: u16, height: u16) -> Result<Self, OpError> {
        if width == 0 || height == 0 {
            return Err(OpError::InvalidDimension(0));
        }
        Ok(Self::Exact { width, height })
    }

    /// Fixed width, aspect-preserving height.
    pub fn aspect_width(width: u16) -> Result<Self, OpError> {
        if width == 0 {
            return Err(OpError::InvalidDimension(0));
        }
        Ok(Self::AspectWidth(width))
    }

    /// Fixed height, aspect-preserving width.
    pub fn aspect_height(height: u16) -> Result<Self, OpError> {
        if height == 0 {
            return Err(OpError::InvalidDimension(0));
        }
        Ok(Self::AspectHeight(height))
    }

    /// Independent per-axis scale factors; both are required together.
    pub fn scale_exact(width_scale: f64, height_scale: f64) -> Result<Self, OpError> {
        check_scale(width_scale)?;
        check_scale(height_scale)?;
        Ok(Self::ScaleExact { width_scale, height_scale })
    }

    /// One aspect-preserving scale factor.
    pub fn scale_aspect(scale: f64) -> Result<Self, OpError> {
        check_scale(scale)?;
        Ok(Self::ScaleAspect(scale))
    }

    /// Human-readable operation name for progress reporting
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Exact { .. } => "resize",
            Self::AspectWidth(_) | Self::AspectHeight(_) => {
                "resize, maintaining aspect ratio"
            }
            Self::ScaleExact { .. } => "resize with scale",
            Self::ScaleAspect(_) => "resize with scale, maintaining aspect ratio",
        }
    }

    /// Resolve the target dimensions for a frame of `src_w` x `src_h`.
    ///
    /// Aspect-derived dimensions are rounded and clamped to at least 1;
    /// scaled dimensions that round to zero or below are rejected.
    fn target_dims(&self, src_w: u16, src_h: u16) -> Result<(u16, u16), OpError> {
        match *self {
            Self::Exact { width, height } => Ok((width, height)),
            Self::AspectWidth(width) => {
                let derived =
                    (f64::from(src_h) * f64::from(width) / f64::from(src_w)).round().max(1.0);
                Ok((width, dim_in_range(derived)?))
            }
            Self::AspectHeight(height) => {
                let derived =
                    (f64::from(src_w) * f64::from(height) / f64::from(src_h)).round().max(1.0);
                Ok((dim_in_range(derived)?, height))
            }
            Self::ScaleExact { width_scale, height_scale } => {
                let width = scaled_dim(src_w, width_scale)?;
                let height = scaled_dim(src_h, height_scale)?;
                Ok((width, height))
            }
            Self::ScaleAspect(scale) => {
                let width = scaled_dim(src_w, scale)?;
                let height = scaled_dim(src_h, scale)?;
                Ok((width, height))
            }
        }
    }

    /// Resize one frame's index grid; the palette and metadata carry over.
    pub fn apply(&self, frame: Frame) -> Result<Frame, OpError> {
        let (dst_w, dst_h) = self.target_dims(frame.width, frame.height)?;
        if (dst_w, dst_h) == (frame.width, frame.height) {
            return Ok(frame);
        }

        let (src_w, src_h) = (frame.width as usize, frame.height as usize);
        let (out_w, out_h) = (dst_w as usize, dst_h as usize);
        let mut pixels = Vec::with_capacity(out_w * out_h);
        for y in 0..out_h {
            let sy = y * src_h / out_h;
            let src_row = &frame.pixels[sy * src_w..(sy + 1) * src_w];
            for x in 0..out_w {
                pixels.push(src_row[x * src_w / out_w]);
            }
        }

        Ok(Frame { width: dst_w, height: dst_h, pixels, ..frame })
    }
}

/// Rounded scaled dimension, rejected when non-positive or unencodable.
fn scaled_dim(src: u16, scale: f64) -> Result<u16, OpError> {
    dim_in_range((f64::from(src) * scale).round())
}

fn dim_in_range(value: f64) -> Result<u16, OpError> {
    if !(value >= 1.0 && value <= f64::from(u16::MAX)) {
        return Err(OpError::InvalidDimension(value as i64));
    }
    Ok(value as u16)
}

fn check_scale(scale: f64) -> Result<(), OpError> {
    if !scale.is_finite() {
        return Err(OpError::InvalidParameter(format!(
            "scale factor must be finite, got {scale}"
        )));
    }
    Ok(())
}

/// Colorimetric transforms: rewrite the palette wholesale.
///
/// The index grid and dimensions are untouched. Hue arithmetic happens in
/// integer 2-degree units (see [`crate::hsv`]), so results are quantized to
/// that resolution; saturation and value are preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecolorOp {
    /// Rotate every entry's hue by a signed number of degrees
    HueShift(f64),
    /// Set every entry's hue to an absolute number of degrees
    HueSet(f64),
}

impl RecolorOp {
    /// Hue rotation in degrees, within `[-180, 180]`.
    pub fn hue_shift(degrees: f64) -> Result<Self, OpError> {
        if !degrees.is_finite() || degrees < -180.0 || degrees > 180.0 {
            return Err(OpError::InvalidParameter(format!(
                "hue shift must be between -180 and 180, got {degrees}"
            )));
        }
        Ok(Self::HueShift(degrees))
    }

    /// Absolute hue in degrees, within `[0, 360)`.
    pub fn hue_set(degrees: f64) -> Result<Self, OpError> {
        if !degrees.is_finite() || degrees < 0.0 || degrees >= 360.0 {
            return Err(OpError::InvalidParameter(format!(
                "hue value must be between 0 and 360, got {degrees}"
            )));
        }
        Ok(Self::HueSet(degrees))
    }

    /// Human-readable operation name for progress reporting
    pub fn describe(&self) -> &'static str {
        match self {
            Self::HueShift(_) => "hue shift",
            Self::HueSet(_) => "hue set",
        }
    }

    /// Recolor one frame's palette; the grid and metadata carry over.
    pub fn apply(&self, mut frame: Frame) -> Result<Frame, OpError> {
        if frame.palette.is_empty() {
            return Err(OpError::UnsupportedPalette);
        }
        match *self {
            Self::HueShift(degrees) => {
                let units = (degrees / 2.0).round() as i32;
                // A shift of zero units must leave the palette bit-exact,
                // so skip the HSV round trip entirely
                if units != 0 {
                    shift_palette_hue(&mut frame.palette, units);
                }
            }
            Self::HueSet(degrees) => {
                let unit = ((degrees / 2.0).round() as i32 % HUE_UNITS) as u8;
                set_palette_hue(&mut frame.palette, unit);
            }
        }
        Ok(frame)
    }
}

/// One edit operation, resolved from CLI parameters: either geometric or
/// colorimetric, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOp {
    Resize(ResizeOp),
    Recolor(RecolorOp),
}

impl FrameOp {
    /// Apply the operation to one frame, yielding exactly one frame.
    pub fn apply(&self, frame: Frame) -> Result<Frame, OpError> {
        match self {
            Self::Resize(op) => op.apply(frame),
            Self::Recolor(op) => op.apply(frame),
        }
    }

    /// Human-readable operation name for progress reporting
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Resize(op) => op.describe(),
            Self::Recolor(op) => op.describe(),
        }
    }
}

impl From<ResizeOp> for FrameOp {
    fn from(op: ResizeOp) -> Self {
        Self::Resize(op)
    }
}

impl From<RecolorOp> for FrameOp {
    fn from(op: RecolorOp) -> Self {
        Self::Recolor(op)
    }
}
