//! Core processing building blocks: envelope resize, region selection and
//! the per-entry pipeline. These are internal primitives consumed by the
//! high-level `api` module.
pub mod params;
pub mod processing;
