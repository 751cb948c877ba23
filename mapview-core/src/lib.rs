#![no_std]

//! mapview-core - Access, open-mode and capacity policy for mapped files
//!
//! This crate holds the pure decisions behind a file mapping: how an
//! [`AccessMode`] translates into stream access and page protection, which
//! [`OpenMode`]s require or create the backing file, how a requested
//! capacity or view size is resolved, and whether a window fits. No I/O
//! happens here.

pub mod error;
pub mod mode;
pub mod validation;

pub use error::*;
pub use mode::{AccessMode, OpenMode, Protection, StreamAccess};
pub use validation::{
    element_span, fit_usize, resolve_capacity, resolve_view_size, validate_buffer_range, validate_window,
    DEFAULT_CAPACITY,
};
