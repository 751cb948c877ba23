//! File open modes

use crate::MapError;

/// How the backing file is located or created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OpenMode {
    /// Create the file; fail if it already exists
    CreateNew = 1,
    /// Create the file, truncating any existing one
    Create = 2,
    /// Open an existing file; fail if it is absent
    Open = 3,
    /// Open the file if present, create it otherwise
    OpenOrCreate = 4,
    /// Open an existing file and truncate it to zero length
    Truncate = 5,
}

impl OpenMode {
    /// Convert from u8 representation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(OpenMode::CreateNew),
            2 => Some(OpenMode::Create),
            3 => Some(OpenMode::Open),
            4 => Some(OpenMode::OpenOrCreate),
            5 => Some(OpenMode::Truncate),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// The file must already exist for this mode to succeed
    pub const fn requires_existing(self) -> bool {
        matches!(self, OpenMode::Open | OpenMode::Truncate)
    }

    /// The mode may create a new file
    pub const fn creates(self) -> bool {
        matches!(
            self,
            OpenMode::CreateNew | OpenMode::Create | OpenMode::OpenOrCreate
        )
    }

    /// The mode discards existing file contents
    pub const fn truncates(self) -> bool {
        matches!(self, OpenMode::Create | OpenMode::Truncate)
    }

    /// The mode always writes to the file system entry, even before mapping
    pub const fn requires_write(self) -> bool {
        matches!(
            self,
            OpenMode::CreateNew | OpenMode::Create | OpenMode::Truncate
        )
    }
}

impl TryFrom<u8> for OpenMode {
    type Error = MapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        OpenMode::from_u8(value).ok_or(MapError::InvalidArgument)
    }
}

impl core::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OpenMode::CreateNew => write!(f, "create-new"),
            OpenMode::Create => write!(f, "create"),
            OpenMode::Open => write!(f, "open"),
            OpenMode::OpenOrCreate => write!(f, "open-or-create"),
            OpenMode::Truncate => write!(f, "truncate"),
        }
    }
}
