//! Region-source interfaces provided by the host application
//!
//! The Cellsparse client never opens image files itself. The host hands it
//! sources that can rasterize a rectangular region of one time frame on
//! demand: the raw image, and two independently rendered label channels
//! (a background/semantic mask and a foreground/instance mask). All three
//! expose the same region-read contract, differing only in the frame type
//! they produce.

use image::{DynamicImage, ImageBuffer, Luma};

use crate::error::Result;

/// One 2D label raster: pixel 0 is "no object", any other value is a label id
///
/// 16-bit pixels leave room for instance ids well beyond the 8-bit range
/// while still round-tripping losslessly through grayscale PNG.
pub type LabelFrame = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Geometry shared by every frame of a source
///
/// Width and height are constant across all frames of one volume; `size_t`
/// is the number of time frames and must be greater than zero for the
/// source to be serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Number of time frames
    pub size_t: usize,
}

/// A rectangular region of one frame to rasterize
///
/// Mirrors the host's region-read contract: a downsample factor, a pixel
/// rectangle, a z-plane, and a time index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRequest {
    /// Downsample factor (1.0 = full resolution)
    pub downsample: f64,
    /// Left edge of the region in pixels
    pub x: u32,
    /// Top edge of the region in pixels
    pub y: u32,
    /// Region width in pixels
    pub width: u32,
    /// Region height in pixels
    pub height: u32,
    /// Z-plane index
    pub z: u32,
    /// Time index
    pub t: usize,
}

impl RegionRequest {
    /// Request one whole frame at full resolution
    ///
    /// Full width and height at downsample 1.0, origin (0, 0), z-plane 0.
    /// This is the only region shape the payload serializer uses.
    pub fn full_frame(metadata: &SourceMetadata, t: usize) -> Self {
        RegionRequest {
            downsample: 1.0,
            x: 0,
            y: 0,
            width: metadata.width,
            height: metadata.height,
            z: 0,
            t,
        }
    }
}

/// A source of 2D rasters indexed by time
///
/// Implemented by the host for the raw image (`Frame = DynamicImage`) and for
/// each rendered label channel (`Frame = LabelFrame`). Implementations report
/// failed reads as [`CellsparseError::Read`](crate::CellsparseError::Read)
/// with the failing time index.
pub trait RegionSource {
    /// Raster type produced by this source
    type Frame;

    /// Geometry shared by all frames
    fn metadata(&self) -> SourceMetadata;

    /// Rasterize one region of one frame
    fn read_region(&self, region: &RegionRequest) -> Result<Self::Frame>;
}

/// An in-memory source backed by pre-rendered frames
///
/// Useful for hosts that already hold the full volume in memory, and as the
/// reference implementation of the [`RegionSource`] contract. Only full-frame
/// reads at downsample 1.0 are supported; the payload serializer never
/// requests anything else.
#[derive(Debug, Clone)]
pub struct MemorySource<F> {
    metadata: SourceMetadata,
    frames: Vec<F>,
}

impl<F> MemorySource<F> {
    /// Wrap pre-rendered frames sharing the given geometry
    pub fn new(metadata: SourceMetadata, frames: Vec<F>) -> Self {
        MemorySource { metadata, frames }
    }
}

impl<F: Clone> RegionSource for MemorySource<F> {
    type Frame = F;

    fn metadata(&self) -> SourceMetadata {
        self.metadata
    }

    fn read_region(&self, region: &RegionRequest) -> Result<F> {
        self.frames
            .get(region.t)
            .cloned()
            .ok_or_else(|| crate::CellsparseError::Read {
                frame: region.t,
                reason: format!("time index out of range (size_t = {})", self.frames.len()),
            })
    }
}

/// Convenience conversion: a [`LabelFrame`] as a codec-ready raster
///
/// Label frames are encoded as 16-bit grayscale so every label id survives
/// the round trip bit-exactly.
pub fn label_frame_to_raster(frame: &LabelFrame) -> DynamicImage {
    DynamicImage::ImageLuma16(frame.clone())
}
