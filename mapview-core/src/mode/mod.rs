//! Access and open modes
//!
//! Plain enumerations plus the translation table from an [`AccessMode`]
//! to the flags handed to the operating system.

pub mod access;
pub mod open;

pub use access::{AccessMode, Protection, StreamAccess};
pub use open::OpenMode;
