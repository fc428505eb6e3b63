use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QaError>;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    Decode { path: PathBuf },

    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },

    /// IDF over zero documents would divide by zero.
    #[error("cannot compute statistics over an empty {what}")]
    EmptyCollection { what: &'static str },
}

impl QaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QaError::Io { path: path.into(), source }
    }
}
