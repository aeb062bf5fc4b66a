use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Could not read parameter preset {path:?}: {source}")]
    PresetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid parameter preset {path:?}: {source}")]
    Preset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write run report {path:?}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Library(#[from] regionpro::Error),
}
