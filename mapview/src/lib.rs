//! mapview - Memory-mapped files with bounded, access-checked views
//!
//! A [`MappedFile`] maps a backing file of a negotiated capacity. Views
//! carved from it with [`MappedFile::create_view`] cover a fixed window with
//! their own [`AccessMode`] and copy plain-old-data elements in and out.
//!
//! ## Architecture
//!
//! - **mapview-core**: access/open modes, capacity policy and bounds checks (no I/O)
//! - **mapview**: the file-backed mapping, views, configuration and errors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mapview::{AccessMode, MappedFile, OpenMode};
//!
//! fn example() -> mapview::Result<()> {
//!     // Capacity 0 sizes the mapping to the file, or 1024 bytes for a new file
//!     let file = MappedFile::open("data.bin", OpenMode::OpenOrCreate, None, 0, AccessMode::ReadWrite)?;
//!
//!     let mut view = file.create_view(0, 0, AccessMode::ReadWrite)?;
//!     view.write_from(0, &[1u32, 2, 3], 0, 3)?;
//!
//!     let mut out = [0u32; 3];
//!     view.read_into(0, &mut out, 0, 3)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Lifetimes
//!
//! The OS mapping is shared between the file and its views and is released
//! when the last of them is disposed or dropped. Disposal of either is
//! idempotent. Callers must synchronize writers on overlapping views
//! themselves.

pub use mapview_core::{AccessMode, MapError, OpenMode, DEFAULT_CAPACITY};

pub mod error;
pub mod mapping;
pub mod options;
pub mod view;

pub use error::{Error, ErrorCategory, Result};
pub use mapping::MappedFile;
pub use options::MapOptions;
pub use view::MappedView;
