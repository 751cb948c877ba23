//! Capacity defaulting for mappings and views

use crate::MapError;

/// Mapping size used when no capacity is requested and the file has no
/// contents to size it from.
pub const DEFAULT_CAPACITY: u64 = 1024;

/// Resolve the effective capacity of a new mapping
///
/// `existing_len` is the current length of the backing file, or `None`
/// when the file does not exist. A request of `0` means "auto": size to the
/// file when it has contents, otherwise [`DEFAULT_CAPACITY`]. Any other
/// request is taken as-is, regardless of the file length.
pub const fn resolve_capacity(requested: u64, existing_len: Option<u64>) -> u64 {
    if requested != 0 {
        return requested;
    }
    match existing_len {
        Some(len) if len > 0 => len,
        _ => DEFAULT_CAPACITY,
    }
}

/// Resolve the effective length of a view into a mapping of `capacity` bytes
///
/// A requested size of `0` means "from `offset` to the end of the mapping".
/// The result is not bounds-checked beyond the `offset <= capacity`
/// requirement of the defaulting case; use
/// [`validate_window`](super::validate_window) for that.
pub const fn resolve_view_size(capacity: u64, offset: u64, size: u64) -> Result<u64, MapError> {
    if size != 0 {
        return Ok(size);
    }
    match capacity.checked_sub(offset) {
        Some(rest) => Ok(rest),
        None => Err(MapError::OutOfRange),
    }
}
