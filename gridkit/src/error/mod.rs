//! Error types

mod build;
mod format;

pub use build::*;
pub use format::*;

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Column configuration error.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Value formatting error.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Format options could not be parsed.
    #[error("Options parse error: {0}")]
    Options(#[from] serde_json::Error),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
