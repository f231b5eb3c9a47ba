use thiserror::Error;

/// Top-level error type for the amiga runtime.
#[derive(Debug, Error)]
pub enum AmigaError {
    #[error("backend error ({provider}): {message}")]
    Backend { provider: String, message: String },

    #[error("stored history could not be decoded: {0}")]
    PersistenceDecode(String),

    #[error("unknown companion: {0}")]
    UnknownCompanion(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
