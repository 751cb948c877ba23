//! Error types for mapped file operations

use mapview_core::{AccessMode, MapError};
use std::{io, path::PathBuf};

/// Errors returned by [`MappedFile`](crate::MappedFile) and
/// [`MappedView`](crate::MappedView) operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The open mode requires an existing file and none was found
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Malformed request
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A window of `len` bytes at `offset` does not fit into `capacity`
    #[error("range {offset}+{len} exceeds capacity {capacity}")]
    OutOfRange { offset: u64, len: u64, capacity: u64 },

    /// The operation needs `requested` access but only `allowed` is granted
    #[error("{requested} access is not permitted by {allowed} access")]
    InvalidAccess {
        requested: AccessMode,
        allowed: AccessMode,
    },

    /// The mapping or view has already been released
    #[error("mapping or view already disposed")]
    Disposed,

    /// Policy check that failed without further context, such as an
    /// unknown raw mode or a capacity the platform cannot address
    #[error("{0}")]
    Policy(#[from] MapError),

    /// Failure surfaced by the operating system
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    InvalidArgument,
    OutOfRange,
    InvalidAccess,
    Disposed,
    Io,
}

impl Error {
    /// Classify this error
    ///
    /// OS permission failures are reported as [`ErrorCategory::InvalidAccess`]
    /// even though the underlying cause is kept as an [`Error::Io`].
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            Error::OutOfRange { .. } => ErrorCategory::OutOfRange,
            Error::InvalidAccess { .. } => ErrorCategory::InvalidAccess,
            Error::Disposed => ErrorCategory::Disposed,
            Error::Policy(MapError::InvalidArgument) => ErrorCategory::InvalidArgument,
            Error::Policy(MapError::OutOfRange) => ErrorCategory::OutOfRange,
            Error::Io(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                ErrorCategory::InvalidAccess
            }
            Error::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Result type for mapped file operations
pub type Result<T> = std::result::Result<T, Error>;
