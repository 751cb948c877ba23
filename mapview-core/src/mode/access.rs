//! Access modes and their translation into OS-level flags

use crate::MapError;

/// Permission class of a mapping or a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AccessMode {
    /// Read-only access
    Read = 0,
    /// Write-only access
    Write = 1,
    /// Read and write access
    ReadWrite = 2,
}

/// Access requested when the backing file itself is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamAccess {
    ReadOnly,
    ReadWrite,
}

/// Protection applied to mapped pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessMode {
    /// Convert from u8 representation
    ///
    /// Unknown values yield `None`; there is no fallback mode.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AccessMode::Read),
            1 => Some(AccessMode::Write),
            2 => Some(AccessMode::ReadWrite),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stream access used when the backing file is opened for this mode.
    ///
    /// There is no write-only stream, so `Write` opens read-write.
    pub const fn stream_access(self) -> StreamAccess {
        match self {
            AccessMode::Read => StreamAccess::ReadOnly,
            AccessMode::Write | AccessMode::ReadWrite => StreamAccess::ReadWrite,
        }
    }

    /// Page protection for a mapping or view created with this mode
    pub const fn protection(self) -> Protection {
        match self {
            AccessMode::Read => Protection::ReadOnly,
            AccessMode::Write => Protection::WriteOnly,
            AccessMode::ReadWrite => Protection::ReadWrite,
        }
    }

    pub const fn can_read(self) -> bool {
        matches!(self, AccessMode::Read | AccessMode::ReadWrite)
    }

    pub const fn can_write(self) -> bool {
        matches!(self, AccessMode::Write | AccessMode::ReadWrite)
    }

    /// Whether a view requesting `requested` may be carved from an owner
    /// opened with `self`. The view may never be more permissive.
    pub const fn permits(self, requested: AccessMode) -> bool {
        (!requested.can_read() || self.can_read()) && (!requested.can_write() || self.can_write())
    }
}

impl TryFrom<u8> for AccessMode {
    type Error = MapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AccessMode::from_u8(value).ok_or(MapError::InvalidArgument)
    }
}

impl core::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessMode::Read => write!(f, "read"),
            AccessMode::Write => write!(f, "write"),
            AccessMode::ReadWrite => write!(f, "read-write"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_table() {
        assert_eq!(AccessMode::Read.stream_access(), StreamAccess::ReadOnly);
        assert_eq!(AccessMode::Write.stream_access(), StreamAccess::ReadWrite);
        assert_eq!(AccessMode::ReadWrite.stream_access(), StreamAccess::ReadWrite);

        assert_eq!(AccessMode::Read.protection(), Protection::ReadOnly);
        assert_eq!(AccessMode::Write.protection(), Protection::WriteOnly);
        assert_eq!(AccessMode::ReadWrite.protection(), Protection::ReadWrite);
    }

    #[test]
    fn test_unknown_raw_mode_is_rejected() {
        assert_eq!(AccessMode::from_u8(3), None);
        assert_eq!(AccessMode::from_u8(255), None);
        assert_eq!(AccessMode::try_from(7), Err(MapError::InvalidArgument));
        assert_eq!(AccessMode::try_from(2), Ok(AccessMode::ReadWrite));
    }

    #[test]
    fn test_raw_values() {
        for mode in [AccessMode::Read, AccessMode::Write, AccessMode::ReadWrite] {
            assert_eq!(AccessMode::from_u8(mode.to_u8()), Some(mode));
        }
    }

    #[test]
    fn test_permits() {
        use AccessMode::*;

        assert!(ReadWrite.permits(Read));
        assert!(ReadWrite.permits(Write));
        assert!(ReadWrite.permits(ReadWrite));

        assert!(Read.permits(Read));
        assert!(!Read.permits(Write));
        assert!(!Read.permits(ReadWrite));

        assert!(Write.permits(Write));
        assert!(!Write.permits(Read));
        assert!(!Write.permits(ReadWrite));
    }
}
