use std::io;
use thiserror::Error;

//===========================================================================//

/// Errors produced while reading or writing icon containers.
#[derive(Debug, Error)]
pub enum IconError {
    /// The container is structurally invalid (wrong magic number, wrong
    /// resource type, or an impossible length/offset).
    #[error("invalid container format: {0}")]
    Format(String),

    /// The stream ended before a declared length or offset was satisfied.
    #[error("truncated stream: {0}")]
    Truncated(#[source] io::Error),

    /// A single embedded image could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// A bitmap could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// Any other I/O failure from the underlying reader or writer.
    #[error(transparent)]
    Io(io::Error),
}

impl IconError {
    /// Returns true if this error only affects a single embedded image, so
    /// that a container reader may skip that image and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, IconError::Decode(_))
    }
}

impl From<io::Error> for IconError {
    fn from(error: io::Error) -> IconError {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            IconError::Truncated(error)
        } else {
            IconError::Io(error)
        }
    }
}

/// Result type for icon container operations.
pub type Result<T> = std::result::Result<T, IconError>;

//===========================================================================//


//===========================================================================//
