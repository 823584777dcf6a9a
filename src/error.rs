use std::path::PathBuf;

/// Errors raised by snapshot export and load.
///
/// Scoring and indexing never fail; degenerate input yields zero scores.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The snapshot could not be encoded, or its file could not be created,
    /// written, renamed, opened or read.
    #[error("snapshot I/O failed for {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bytes at `path` do not decode into a valid engine state.
    #[error("invalid snapshot {path:?}: {reason}")]
    Deserialization { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Persistence {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn deserialization(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Deserialization {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
