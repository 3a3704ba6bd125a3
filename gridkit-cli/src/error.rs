use std::path::PathBuf;

/// Errors reported by the `gridkit` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: gridkit::Error,
    },

    #[error(transparent)]
    Grid(#[from] gridkit::Error),

    #[error("Failed to serialize grid: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<gridkit::FormatError> for CliError {
    fn from(err: gridkit::FormatError) -> Self {
        Self::Grid(err.into())
    }
}
