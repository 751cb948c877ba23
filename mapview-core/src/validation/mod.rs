//! Capacity resolution and window validation
//!
//! This module contains pure functions with no I/O dependencies. All
//! functions operate on byte counts and offsets only.

pub mod bounds;
pub mod capacity;

pub use bounds::{element_span, fit_usize, validate_buffer_range, validate_window};
pub use capacity::{resolve_capacity, resolve_view_size, DEFAULT_CAPACITY};
