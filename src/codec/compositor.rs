//! Label compositor
//!
//! Merges two independently rendered label channels into one label volume.
//! The background channel carries the semantic mask (typically 0 and 1), the
//! foreground channel carries instance ids that the host's label renderer has
//! already offset by [`FOREGROUND_OFFSET`] so they never collide with the
//! background value. The merge takes the pixelwise maximum, which lets any
//! nonzero instance id win over the background label at that pixel.
//!
//! The maximum is only the right answer while nonzero foreground values
//! dominate the background value at the same pixel. That precondition is
//! checked during composition; a violation fails the whole volume instead of
//! silently producing a mislabeled merge.

use image::Luma;
use tracing::debug;

use crate::error::{CellsparseError, Result};
use crate::source::{LabelFrame, RegionRequest, RegionSource};

/// Offset the host applies to foreground instance ids before rendering
///
/// With a background label of at most 1, offsetting instance ids by 1 makes
/// the smallest foreground id 2, so the pixelwise maximum always prefers it.
pub const FOREGROUND_OFFSET: u16 = 1;

/// A composited label volume: one merged frame per time index
///
/// All frames share the same width and height; the frame count is greater
/// than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVolume {
    width: u32,
    height: u32,
    frames: Vec<LabelFrame>,
}

impl LabelVolume {
    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of time frames
    pub fn size_t(&self) -> usize {
        self.frames.len()
    }

    /// Merged frames in time order
    pub fn frames(&self) -> &[LabelFrame] {
        &self.frames
    }
}

/// Merge one background and one foreground frame by pixelwise maximum
///
/// Both frames must share the same dimensions. Fails with
/// [`CellsparseError::Composition`] on a geometry mismatch or when a nonzero
/// foreground label is smaller than the background label at the same pixel.
/// Inputs are left untouched; the merged frame is freshly allocated.
pub fn composite_frame(background: &LabelFrame, foreground: &LabelFrame) -> Result<LabelFrame> {
    if background.dimensions() != foreground.dimensions() {
        let (bw, bh) = background.dimensions();
        let (fw, fh) = foreground.dimensions();
        return Err(CellsparseError::Composition(format!(
            "frame geometry mismatch: background {bw}x{bh}, foreground {fw}x{fh}"
        )));
    }

    let (width, height) = background.dimensions();
    let mut merged = LabelFrame::new(width, height);
    for (x, y, pixel) in merged.enumerate_pixels_mut() {
        let bg = background.get_pixel(x, y)[0];
        let fg = foreground.get_pixel(x, y)[0];
        if fg != 0 && fg < bg {
            return Err(CellsparseError::Composition(format!(
                "foreground label {fg} below background label {bg} at ({x}, {y})"
            )));
        }
        *pixel = Luma([bg.max(fg)]);
    }
    Ok(merged)
}

/// Composite every time frame of a background/foreground source pair
///
/// Both sources must agree on width, height, and frame count. Frames are
/// read and merged in increasing time order; the first failed read or merge
/// aborts the whole volume so a partial result is never produced.
pub fn composite_labels<B, F>(background: &B, foreground: &F) -> Result<LabelVolume>
where
    B: RegionSource<Frame = LabelFrame>,
    F: RegionSource<Frame = LabelFrame>,
{
    let bg_meta = background.metadata();
    let fg_meta = foreground.metadata();
    if bg_meta != fg_meta {
        return Err(CellsparseError::Composition(format!(
            "label source geometry mismatch: background {bg_meta:?}, foreground {fg_meta:?}"
        )));
    }
    if bg_meta.size_t == 0 {
        return Err(CellsparseError::EmptyVolume);
    }

    let mut frames = Vec::with_capacity(bg_meta.size_t);
    for t in 0..bg_meta.size_t {
        let region = RegionRequest::full_frame(&bg_meta, t);
        let bg_frame = background.read_region(&region)?;
        let fg_frame = foreground.read_region(&region)?;
        frames.push(composite_frame(&bg_frame, &fg_frame)?);
    }
    debug!(size_t = bg_meta.size_t, "composited label volume");

    Ok(LabelVolume {
        width: bg_meta.width,
        height: bg_meta.height,
        frames,
    })
}
