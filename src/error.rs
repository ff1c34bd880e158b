//! Library error type.
//!
//! The CLI layer wraps these in `anyhow` with file context; library callers can
//! match on the variants directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Collection was started on a parser with no extractors registered.
    #[error(
        "Missing extractor functions. Provide them when creating the parser or add them with `add_extractor()`"
    )]
    MissingExtractors,

    /// A rewrite was requested before any collection pass ran.
    #[error("No replacement sites were collected. Parse the source before rewriting it")]
    NothingCollected,

    /// An explicit file name was given but it is empty.
    #[error("File name must be a non-empty string")]
    InvalidFileName,

    /// The top-level source of a file could not be parsed.
    #[error("Failed to parse {file_name}: {message}")]
    Parse { file_name: String, message: String },

    #[error("Invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
