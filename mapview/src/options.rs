//! Mapping configuration

use crate::{MappedFile, Result};
use mapview_core::{AccessMode, OpenMode};
use std::path::Path;

/// Settings for opening a [`MappedFile`]
///
/// Defaults: open or create the file, size the mapping automatically and
/// map it read-write.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MapOptions {
    /// How the backing file is located or created
    pub open_mode: OpenMode,
    /// Optional identifier recorded on the mapping
    pub map_name: Option<String>,
    /// Requested capacity in bytes; `0` sizes the mapping automatically
    pub capacity: u64,
    /// Access mode of the mapping
    pub access: AccessMode,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open_mode(mut self, open_mode: OpenMode) -> Self {
        self.open_mode = open_mode;
        self
    }

    pub fn with_map_name(mut self, name: impl Into<String>) -> Self {
        self.map_name = Some(name.into());
        self
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }

    /// Open `path` with these settings
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<MappedFile> {
        MappedFile::open(
            path,
            self.open_mode,
            self.map_name.as_deref(),
            self.capacity,
            self.access,
        )
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            open_mode: OpenMode::OpenOrCreate,
            map_name: None,
            capacity: 0,
            access: AccessMode::ReadWrite,
        }
    }
}
