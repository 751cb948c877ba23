//! Bounded views into a mapped file

use crate::{Error, Result};
use bytemuck::Pod;
use mapview_core::{element_span, validate_buffer_range, validate_window, AccessMode};
use memmap2::MmapRaw;
use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};
use tracing::trace;

/// A fixed window into a [`MappedFile`](crate::MappedFile)
///
/// Element access is limited to [`Pod`] types so mapped bytes are never
/// reinterpreted as references. Positions are relative to the start of the
/// view and need not be aligned.
///
/// # Concurrency
///
/// Views may be shared with or sent to other threads. Mapped bytes are
/// only touched through relaxed single-byte atomic operations, so
/// overlapping views used concurrently never race. Each byte written is
/// visible to later reads on its own; a multi-byte element may be observed
/// half-written and no ordering holds between views. Callers that need
/// whole-element consistency must synchronize themselves.
#[derive(Debug)]
pub struct MappedView {
    region: Option<Arc<MmapRaw>>,
    start: usize,
    capacity: u64,
    access: AccessMode,
}

impl MappedView {
    pub(crate) fn new(region: Arc<MmapRaw>, start: usize, capacity: u64, access: AccessMode) -> Self {
        Self {
            region: Some(region),
            start,
            capacity,
            access,
        }
    }

    /// Copy `count` elements at byte `position` into `buffer[buffer_offset..]`
    pub fn read_into<T: Pod>(
        &self,
        position: u64,
        buffer: &mut [T],
        buffer_offset: usize,
        count: usize,
    ) -> Result<()> {
        let region = self.region()?;
        self.require(AccessMode::Read)?;

        let range = validate_buffer_range(buffer.len(), buffer_offset, count)
            .map_err(|_| buffer_out_of_range(buffer.len(), buffer_offset, count))?;
        let span = element_span::<T>(count).unwrap_or(u64::MAX);
        let at = self.locate(position, span)?;
        if span == 0 {
            return Ok(());
        }

        let dst: &mut [u8] = bytemuck::cast_slice_mut(&mut buffer[range]);
        // SAFETY: `locate` checked that `at..at + dst.len()` lies inside the
        // view, which lies inside the mapping kept alive by `region`.
        let mapped = unsafe { mapped_bytes(region.as_ptr().add(at), dst.len()) };
        for (out, cell) in dst.iter_mut().zip(mapped) {
            *out = cell.load(Ordering::Relaxed);
        }
        Ok(())
    }

    /// Copy `count` elements from `buffer[buffer_offset..]` to byte `position`
    pub fn write_from<T: Pod>(
        &mut self,
        position: u64,
        buffer: &[T],
        buffer_offset: usize,
        count: usize,
    ) -> Result<()> {
        let region = self.region()?;
        self.require(AccessMode::Write)?;

        let range = validate_buffer_range(buffer.len(), buffer_offset, count)
            .map_err(|_| buffer_out_of_range(buffer.len(), buffer_offset, count))?;
        let span = element_span::<T>(count).unwrap_or(u64::MAX);
        let at = self.locate(position, span)?;
        if span == 0 {
            return Ok(());
        }

        let src: &[u8] = bytemuck::cast_slice(&buffer[range]);
        // SAFETY: bounds as in `read_into`; the view was created with write
        // access, so the mapping itself is writable.
        let mapped = unsafe { mapped_bytes(region.as_mut_ptr().add(at), src.len()) };
        for (cell, byte) in mapped.iter().zip(src) {
            cell.store(*byte, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Read a single value at byte `position`
    pub fn read<T: Pod>(&self, position: u64) -> Result<T> {
        let mut value = [T::zeroed()];
        self.read_into(position, &mut value, 0, 1)?;
        Ok(value[0])
    }

    /// Write a single value at byte `position`
    pub fn write<T: Pod>(&mut self, position: u64, value: &T) -> Result<()> {
        self.write_from(position, std::slice::from_ref(value), 0, 1)
    }

    /// Flush writes made through this view to the backing file
    pub fn flush(&self) -> Result<()> {
        let region = self.region()?;
        if self.access.can_write() && self.capacity > 0 {
            // capacity fits: the view lies inside the mapping
            region.flush_range(self.start, self.capacity as usize)?;
        }
        Ok(())
    }

    /// Length of the view in bytes; available after disposal
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Byte offset of the view inside its mapping
    pub fn offset(&self) -> u64 {
        self.start as u64
    }

    pub fn access(&self) -> AccessMode {
        self.access
    }

    pub fn is_disposed(&self) -> bool {
        self.region.is_none()
    }

    /// Release the view. Repeated calls are no-ops.
    pub fn dispose(&mut self) {
        if self.region.take().is_some() {
            trace!(offset = self.start, capacity = self.capacity, "disposed view");
        }
    }

    fn region(&self) -> Result<&MmapRaw> {
        self.region.as_deref().ok_or(Error::Disposed)
    }

    fn require(&self, needed: AccessMode) -> Result<()> {
        if self.access.permits(needed) {
            Ok(())
        } else {
            Err(Error::InvalidAccess {
                requested: needed,
                allowed: self.access,
            })
        }
    }

    /// Absolute mapping offset of `len` bytes at view `position`
    fn locate(&self, position: u64, len: u64) -> Result<usize> {
        validate_window(position, len, self.capacity).map_err(|_| Error::OutOfRange {
            offset: position,
            len,
            capacity: self.capacity,
        })?;
        Ok(self.start + position as usize)
    }
}

impl Drop for MappedView {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Borrow `len` mapped bytes as atomics
///
/// # Safety
///
/// `ptr..ptr + len` must lie inside a live mapping that outlives the
/// returned slice. Stores additionally require the pages to be writable.
unsafe fn mapped_bytes<'a>(ptr: *const u8, len: usize) -> &'a [AtomicU8] {
    // AtomicU8 has the size and alignment of u8
    std::slice::from_raw_parts(ptr.cast::<AtomicU8>(), len)
}

fn buffer_out_of_range(buffer_len: usize, buffer_offset: usize, count: usize) -> Error {
    Error::OutOfRange {
        offset: buffer_offset as u64,
        len: count as u64,
        capacity: buffer_len as u64,
    }
}
