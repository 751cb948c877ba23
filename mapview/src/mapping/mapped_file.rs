//! File-backed mapping that hands out views

use super::backing::{self, OpenRoute};
use crate::{view::MappedView, Error, Result};
use mapview_core::{resolve_capacity, resolve_view_size, validate_window, AccessMode, OpenMode};
use memmap2::MmapRaw;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Weak},
};
use tracing::{debug, trace};

/// A memory mapping over a single backing file
///
/// The mapping is shared with every [`MappedView`] created from it and is
/// unmapped once the file and all of its views have been disposed (or
/// dropped), whichever happens last. Disposing the file while views are
/// still in use is therefore memory-safe, but the caller remains
/// responsible for coordinating writers on overlapping views.
#[derive(Debug)]
pub struct MappedFile {
    region: Option<Arc<MmapRaw>>,
    shared: Weak<MmapRaw>,
    capacity: u64,
    access: AccessMode,
    name: Option<String>,
    path: PathBuf,
}

impl MappedFile {
    /// Open or create `path` and map `capacity` bytes of it
    ///
    /// A `capacity` of `0` sizes the mapping to the current file length, or
    /// to [`DEFAULT_CAPACITY`](mapview_core::DEFAULT_CAPACITY) when the file
    /// is absent or empty. Writable mappings extend the file when the
    /// capacity exceeds its length.
    ///
    /// `map_name` is recorded for identification only; mappings are always
    /// file-backed.
    pub fn open<P: AsRef<Path>>(
        path: P,
        open_mode: OpenMode,
        map_name: Option<&str>,
        capacity: u64,
        access: AccessMode,
    ) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("path must not be empty"));
        }

        let existing_len = backing::file_length(path)?;
        if existing_len.is_none() && open_mode.requires_existing() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        let creates_file = existing_len.is_none() && open_mode.creates();
        if (open_mode.requires_write() || creates_file) && !access.can_write() {
            return Err(Error::InvalidAccess {
                requested: AccessMode::Write,
                allowed: access,
            });
        }

        let capacity = resolve_capacity(capacity, existing_len);
        let route = backing::select_route(open_mode, existing_len.is_some());
        let region = Arc::new(backing::map_file(path, route, open_mode, capacity, access)?);

        debug!(
            path = %path.display(),
            capacity,
            %access,
            %open_mode,
            direct = (route == OpenRoute::Path),
            "mapped file"
        );

        Ok(Self {
            shared: Arc::downgrade(&region),
            region: Some(region),
            capacity,
            access,
            name: map_name.map(str::to_owned),
            path: path.to_path_buf(),
        })
    }

    /// Create a view of `size` bytes starting at `offset`
    ///
    /// A `size` of `0` extends the view to the end of the mapping. The view
    /// access may not be more permissive than the mapping's own access.
    pub fn create_view(&self, offset: u64, size: u64, access: AccessMode) -> Result<MappedView> {
        let region = self.region.as_ref().ok_or(Error::Disposed)?;

        let out_of_range = |len| Error::OutOfRange {
            offset,
            len,
            capacity: self.capacity,
        };
        let size = resolve_view_size(self.capacity, offset, size).map_err(|_| out_of_range(0))?;
        validate_window(offset, size, self.capacity).map_err(|_| out_of_range(size))?;

        if !self.access.permits(access) {
            return Err(Error::InvalidAccess {
                requested: access,
                allowed: self.access,
            });
        }

        // Both fit: the window lies inside a mapping whose length is a usize
        let view = MappedView::new(Arc::clone(region), offset as usize, size, access);
        trace!(path = %self.path.display(), offset, size, %access, "created view");
        Ok(view)
    }

    /// Effective mapping size in bytes
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Access mode the mapping was opened with
    pub fn access(&self) -> AccessMode {
        self.access
    }

    /// Name given to the mapping at open time
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_disposed(&self) -> bool {
        self.region.is_none()
    }

    /// Number of views created from this mapping that have not been
    /// disposed yet. Still accurate after the file itself was disposed.
    pub fn live_views(&self) -> usize {
        let holders = self.shared.strong_count();
        match self.region {
            Some(_) => holders - 1,
            None => holders,
        }
    }

    /// Flush outstanding writes of the whole mapping to the backing file
    ///
    /// Read-only mappings have nothing to flush.
    pub fn flush(&self) -> Result<()> {
        let region = self.region.as_ref().ok_or(Error::Disposed)?;
        if self.access.can_write() {
            region.flush()?;
        }
        Ok(())
    }

    /// Release this handle on the mapping. Repeated calls are no-ops.
    pub fn dispose(&mut self) {
        if let Some(region) = self.region.take() {
            let remaining = Arc::strong_count(&region) - 1;
            drop(region);
            debug!(
                path = %self.path.display(),
                live_views = remaining,
                "released mapping"
            );
        }
    }
}

impl Drop for MappedFile {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io::Write};

    fn write_file(path: &Path, len: usize) {
        let mut f = fs::File::create(path).unwrap();
        f.write_all(&vec![0xABu8; len]).unwrap();
    }

    #[test]
    fn test_open_rejects_empty_path() {
        let err = MappedFile::open("", OpenMode::OpenOrCreate, None, 0, AccessMode::ReadWrite)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_truncate_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        let err = MappedFile::open(&path, OpenMode::Truncate, None, 0, AccessMode::ReadWrite)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_read_only_with_writing_mode_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.bin");
        write_file(&path, 64);

        for mode in [OpenMode::Create, OpenMode::Truncate, OpenMode::CreateNew] {
            let err = MappedFile::open(&path, mode, None, 0, AccessMode::Read).unwrap_err();
            assert!(matches!(err, Error::InvalidAccess { .. }), "{mode}");
        }
        // Nothing was truncated
        assert_eq!(fs::metadata(&path).unwrap().len(), 64);
    }

    #[test]
    fn test_create_resolves_pre_truncation_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trunc.bin");
        write_file(&path, 3000);

        let file =
            MappedFile::open(&path, OpenMode::Create, None, 0, AccessMode::ReadWrite).unwrap();
        assert_eq!(file.capacity(), 3000);

        // Contents were discarded, then the file was grown back to capacity
        let view = file.create_view(0, 0, AccessMode::Read).unwrap();
        assert_eq!(view.read::<u8>(0).unwrap(), 0);
        assert_eq!(fs::metadata(&path).unwrap().len(), 3000);
    }

    #[test]
    fn test_explicit_capacity_smaller_than_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefix.bin");
        write_file(&path, 2048);

        let file = MappedFile::open(&path, OpenMode::Open, None, 100, AccessMode::Read).unwrap();
        assert_eq!(file.capacity(), 100);
        assert_eq!(fs::metadata(&path).unwrap().len(), 2048);

        let view = file.create_view(0, 0, AccessMode::Read).unwrap();
        assert_eq!(view.capacity(), 100);
        assert_eq!(view.read::<u8>(99).unwrap(), 0xAB);
    }

    #[test]
    fn test_view_access_cannot_exceed_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access.bin");
        write_file(&path, 128);

        let ro = MappedFile::open(&path, OpenMode::Open, None, 0, AccessMode::Read).unwrap();
        assert!(ro.create_view(0, 0, AccessMode::Read).is_ok());
        for access in [AccessMode::Write, AccessMode::ReadWrite] {
            let err = ro.create_view(0, 0, access).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidAccess {
                    allowed: AccessMode::Read,
                    ..
                }
            ));
        }

        let wo = MappedFile::open(&path, OpenMode::Open, None, 0, AccessMode::Write).unwrap();
        assert!(wo.create_view(0, 0, AccessMode::Write).is_ok());
        assert!(wo.create_view(0, 0, AccessMode::Read).is_err());
        assert!(wo.create_view(0, 0, AccessMode::ReadWrite).is_err());
    }

    #[test]
    fn test_view_offset_past_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("past.bin");

        let file = MappedFile::open(&path, OpenMode::OpenOrCreate, None, 0, AccessMode::ReadWrite)
            .unwrap();
        let err = file.create_view(1025, 0, AccessMode::Read).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { offset: 1025, .. }));

        let err = file.create_view(u64::MAX, 2, AccessMode::Read).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));

        // An empty view at the very end is allowed
        let view = file.create_view(1024, 0, AccessMode::Read).unwrap();
        assert_eq!(view.capacity(), 0);
    }

    #[test]
    fn test_dispose_is_idempotent_and_tracks_views() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dispose.bin");

        let mut file =
            MappedFile::open(&path, OpenMode::OpenOrCreate, Some("scratch"), 0, AccessMode::ReadWrite)
                .unwrap();
        assert_eq!(file.name(), Some("scratch"));
        assert_eq!(file.live_views(), 0);

        let mut first = file.create_view(0, 16, AccessMode::ReadWrite).unwrap();
        let second = file.create_view(8, 16, AccessMode::Read).unwrap();
        assert_eq!(file.live_views(), 2);

        first.dispose();
        assert_eq!(file.live_views(), 1);

        file.dispose();
        file.dispose();
        assert!(file.is_disposed());
        assert_eq!(file.live_views(), 1);
        assert!(matches!(
            file.create_view(0, 0, AccessMode::Read),
            Err(Error::Disposed)
        ));
        assert!(matches!(file.flush(), Err(Error::Disposed)));

        // The surviving view still reads from the mapping
        assert_eq!(second.read::<u8>(0).unwrap(), 0);
        drop(second);
        assert_eq!(file.live_views(), 0);
    }
}
