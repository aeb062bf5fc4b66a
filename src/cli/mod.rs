//! Command Line Interface (CLI) layer for regionpro.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for a batch run. It wires
//! user-provided options to the library functionality exposed via
//! `regionpro::api`.
//!
//! If you are embedding regionpro into another application, prefer using
//! the high-level `regionpro::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
