//! Memory-mapped file backend
//!
//! This module opens or creates backing files, resolves the mapping
//! capacity and owns the resulting OS mapping.

mod backing;
mod mapped_file;

pub use mapped_file::MappedFile;
