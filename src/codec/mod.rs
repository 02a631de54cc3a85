//! Payload codec layer
//!
//! Everything between a host-provided raster source and the transport-safe
//! request payload: the lossless frame codec, the label compositor, and the
//! volume serializer that joins encoded frames into one delimited string.

pub mod compositor;
pub mod frame;
pub mod volume;

pub use compositor::{composite_frame, composite_labels, LabelVolume, FOREGROUND_OFFSET};
pub use frame::{decode_raster, encode_raster, EncodedFrame};
pub use volume::{serialize_images, serialize_label_volume, EncodedVolume, FRAME_DELIMITER};
