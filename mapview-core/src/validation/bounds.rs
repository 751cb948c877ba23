//! Window and buffer bounds validation
//!
//! Overflow in any offset arithmetic is reported as
//! [`MapError::OutOfRange`]: a window whose end cannot be represented
//! cannot fit inside any capacity.

use crate::MapError;
use core::ops::Range;

/// Validate that `[offset, offset + len)` lies inside `capacity` bytes
pub const fn validate_window(offset: u64, len: u64, capacity: u64) -> Result<(), MapError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(MapError::OutOfRange),
    }
}

/// Byte length of `count` elements of `T`
pub const fn element_span<T>(count: usize) -> Result<u64, MapError> {
    let element_size = core::mem::size_of::<T>();
    match count.checked_mul(element_size) {
        Some(bytes) => Ok(bytes as u64),
        None => Err(MapError::OutOfRange),
    }
}

/// Validate that `count` elements starting at `buffer_offset` fit into a
/// destination of `buffer_len` elements, returning the element range.
pub const fn validate_buffer_range(
    buffer_len: usize,
    buffer_offset: usize,
    count: usize,
) -> Result<Range<usize>, MapError> {
    match buffer_offset.checked_add(count) {
        Some(end) if end <= buffer_len => Ok(buffer_offset..end),
        _ => Err(MapError::OutOfRange),
    }
}

/// Narrow a byte count to the platform's address width
pub fn fit_usize(value: u64) -> Result<usize, MapError> {
    usize::try_from(value).map_err(|_| MapError::InvalidArgument)
}
