//! Error types for mapping policy checks

/// Errors raised by the pure policy and validation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Malformed argument (unknown raw mode, value that does not fit the platform)
    InvalidArgument,
    /// Requested window extends past the owning capacity
    OutOfRange,
}

impl core::fmt::Display for MapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MapError::InvalidArgument => "Invalid argument",
            MapError::OutOfRange => "Window out of range",
        };
        write!(f, "{msg}")
    }
}

/// Result type for policy checks
pub type Result<T> = core::result::Result<T, MapError>;

impl core::error::Error for MapError {}
