//! Output writers: the two text dialects and JPEG crops.
pub mod jpeg;
pub mod text;

pub use jpeg::{write_crop, write_overlay};
pub use text::{CropRecord, ProposalHeader, write_coordinate_list, write_crop_manifest};
