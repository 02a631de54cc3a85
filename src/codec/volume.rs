//! Volume serializer
//!
//! Turns a multi-frame image or label volume into a single delimited string:
//! every time frame is encoded with the frame codec and the results are
//! joined with [`FRAME_DELIMITER`] in time order, with no trailing delimiter.
//! The service splits on the delimiter and decodes each segment
//! independently, so a volume with `size_t` frames always yields exactly
//! `size_t` decodable segments.
//!
//! Serialization is all-or-nothing: the first failed read or encode aborts
//! the volume, because the service must receive either a complete, consistent
//! volume or none at all.

use image::DynamicImage;
use tracing::debug;

use crate::codec::compositor::LabelVolume;
use crate::codec::frame::{self, EncodedFrame};
use crate::error::{CellsparseError, Result};
use crate::source::{label_frame_to_raster, RegionRequest, RegionSource};

/// Separator between encoded frames inside one volume string
///
/// Reserved: the frame codec's base64 alphabet can never produce it.
pub const FRAME_DELIMITER: char = ';';

/// A whole volume as one delimited, transport-safe string
///
/// Splitting on [`FRAME_DELIMITER`] yields the encoded frames in time order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedVolume(String);

impl EncodedVolume {
    /// View the joined text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the joined text
    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of encoded frames in the volume
    pub fn frame_count(&self) -> usize {
        self.0.split(FRAME_DELIMITER).count()
    }

    /// Encoded frames in time order
    pub fn frames(&self) -> impl Iterator<Item = EncodedFrame> + '_ {
        self.0
            .split(FRAME_DELIMITER)
            .map(|segment| EncodedFrame::from_text(segment))
    }

    fn join(frames: Vec<EncodedFrame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(CellsparseError::EmptyVolume);
        }
        let joined = frames
            .iter()
            .map(EncodedFrame::as_str)
            .collect::<Vec<_>>()
            .join(&FRAME_DELIMITER.to_string());
        Ok(EncodedVolume(joined))
    }
}

/// Serialize every time frame of an image source
///
/// Reads frame `t` for `t` in `0..size_t` in increasing order, one full-frame
/// region per time index (full resolution, origin (0, 0), z-plane 0), and
/// joins the encoded frames. Fails with the first read or encode error and
/// never returns a partially built volume; an empty source is
/// [`CellsparseError::EmptyVolume`].
pub fn serialize_images<S>(source: &S) -> Result<EncodedVolume>
where
    S: RegionSource<Frame = DynamicImage>,
{
    let metadata = source.metadata();
    if metadata.size_t == 0 {
        return Err(CellsparseError::EmptyVolume);
    }

    let mut frames = Vec::with_capacity(metadata.size_t);
    for t in 0..metadata.size_t {
        let raster = source.read_region(&RegionRequest::full_frame(&metadata, t))?;
        frames.push(frame::encode_raster(&raster)?);
    }
    debug!(
        size_t = metadata.size_t,
        width = metadata.width,
        height = metadata.height,
        "serialized image volume"
    );
    EncodedVolume::join(frames)
}

/// Serialize a composited label volume
///
/// Each merged label frame is encoded as 16-bit grayscale so every label id
/// survives bit-exactly. Same ordering and all-or-nothing policy as
/// [`serialize_images`].
pub fn serialize_label_volume(volume: &LabelVolume) -> Result<EncodedVolume> {
    let mut frames = Vec::with_capacity(volume.size_t());
    for label_frame in volume.frames() {
        frames.push(frame::encode_raster(&label_frame_to_raster(label_frame))?);
    }
    debug!(size_t = volume.size_t(), "serialized label volume");
    EncodedVolume::join(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compositor::composite_labels;
    use crate::source::{LabelFrame, MemorySource, SourceMetadata};
    use image::GrayImage;
    use std::cell::RefCell;

    /// Image source that records every region it is asked to read.
    struct RecordingSource {
        metadata: SourceMetadata,
        reads: RefCell<Vec<RegionRequest>>,
        fail_at: Option<usize>,
    }

    impl RecordingSource {
        fn new(size_t: usize) -> Self {
            RecordingSource {
                metadata: SourceMetadata {
                    width: 4,
                    height: 3,
                    size_t,
                },
                reads: RefCell::new(Vec::new()),
                fail_at: None,
            }
        }

        fn failing_at(size_t: usize, t: usize) -> Self {
            let mut source = Self::new(size_t);
            source.fail_at = Some(t);
            source
        }
    }

    impl RegionSource for RecordingSource {
        type Frame = DynamicImage;

        fn metadata(&self) -> SourceMetadata {
            self.metadata
        }

        fn read_region(&self, region: &RegionRequest) -> crate::Result<DynamicImage> {
            self.reads.borrow_mut().push(*region);
            if self.fail_at == Some(region.t) {
                return Err(CellsparseError::Read {
                    frame: region.t,
                    reason: "simulated read failure".to_string(),
                });
            }
            let t = region.t as u8;
            Ok(DynamicImage::ImageLuma8(GrayImage::from_pixel(
                self.metadata.width,
                self.metadata.height,
                image::Luma([t]),
            )))
        }
    }

    #[test]
    fn test_serialize_reads_every_frame_in_time_order() {
        let source = RecordingSource::new(4);
        let volume = serialize_images(&source).unwrap();

        let reads = source.reads.borrow();
        let times: Vec<usize> = reads.iter().map(|r| r.t).collect();
        assert_eq!(times, vec![0, 1, 2, 3]);
        for read in reads.iter() {
            assert_eq!(read.downsample, 1.0);
            assert_eq!((read.x, read.y, read.z), (0, 0, 0));
            assert_eq!((read.width, read.height), (4, 3));
        }
        assert_eq!(volume.frame_count(), 4);
    }

    #[test]
    fn test_serialized_volume_has_n_minus_one_delimiters() {
        let source = RecordingSource::new(3);
        let volume = serialize_images(&source).unwrap();

        let delimiters = volume.as_str().matches(FRAME_DELIMITER).count();
        assert_eq!(delimiters, 2);
        assert!(!volume.as_str().ends_with(FRAME_DELIMITER));
    }

    #[test]
    fn test_every_segment_decodes_to_its_frame() {
        let source = RecordingSource::new(3);
        let volume = serialize_images(&source).unwrap();

        for (t, encoded) in volume.frames().enumerate() {
            let decoded = frame::decode_raster(&encoded).unwrap();
            assert_eq!(decoded.to_luma8().get_pixel(0, 0)[0], t as u8);
        }
    }

    #[test]
    fn test_failed_read_aborts_whole_volume() {
        let source = RecordingSource::failing_at(5, 2);
        let err = serialize_images(&source).unwrap_err();

        assert!(matches!(err, CellsparseError::Read { frame: 2, .. }));
        // No read past the failing frame: abort, never a partial payload.
        assert_eq!(source.reads.borrow().len(), 3);
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let source = RecordingSource::new(0);
        let err = serialize_images(&source).unwrap_err();
        assert!(matches!(err, CellsparseError::EmptyVolume));
        assert!(source.reads.borrow().is_empty());
    }

    #[test]
    fn test_label_volume_roundtrips_through_serialization() {
        let metadata = SourceMetadata {
            width: 2,
            height: 2,
            size_t: 2,
        };
        let background = MemorySource::new(
            metadata,
            vec![
                LabelFrame::from_raw(2, 2, vec![1, 1, 0, 0]).unwrap(),
                LabelFrame::from_raw(2, 2, vec![0, 0, 1, 1]).unwrap(),
            ],
        );
        let foreground = MemorySource::new(
            metadata,
            vec![
                LabelFrame::from_raw(2, 2, vec![0, 2, 3, 0]).unwrap(),
                LabelFrame::from_raw(2, 2, vec![500, 0, 0, 2]).unwrap(),
            ],
        );
        let labels = composite_labels(&background, &foreground).unwrap();

        let volume = serialize_label_volume(&labels).unwrap();
        assert_eq!(volume.frame_count(), 2);

        let decoded: Vec<LabelFrame> = volume
            .frames()
            .map(|f| frame::decode_raster(&f).unwrap().to_luma16())
            .collect();
        assert_eq!(decoded.as_slice(), labels.frames());
    }
}
