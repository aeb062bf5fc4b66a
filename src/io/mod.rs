//! I/O layer: manifest reading, output path resolution, and `writers`
//! for the coordinate-list and crop-manifest dialects.
pub mod manifest;
pub use manifest::{ManifestEntry, read_manifest};

pub mod paths;

pub mod writers;
