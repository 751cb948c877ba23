//! Backing file handling and mapping creation
//!
//! Everything that talks to the file system or to `memmap2` lives here.
//! File handles opened in this module are dropped as soon as the mapping
//! exists; the mapping does not depend on them afterwards.

use crate::{Error, Result};
use mapview_core::{fit_usize, AccessMode, OpenMode, Protection, StreamAccess};
use memmap2::{MmapOptions, MmapRaw};
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::Path,
};

/// How the backing file was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenRoute {
    /// Existing file opened straight from its path
    Path,
    /// File opened (and possibly created) with the caller's open mode and
    /// restricted sharing
    Stream,
}

/// Current length of the file at `path`, or `None` when it does not exist
pub(crate) fn file_length(path: &Path) -> Result<Option<u64>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.len())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Pick the route for a given open mode and file state
pub(crate) fn select_route(open_mode: OpenMode, exists: bool) -> OpenRoute {
    if open_mode == OpenMode::Open && exists {
        OpenRoute::Path
    } else {
        OpenRoute::Stream
    }
}

/// Open the backing file along `route` and map `capacity` bytes of it
pub(crate) fn map_file(
    path: &Path,
    route: OpenRoute,
    open_mode: OpenMode,
    capacity: u64,
    access: AccessMode,
) -> Result<MmapRaw> {
    let file = match route {
        OpenRoute::Path => open_existing(path, access)?,
        OpenRoute::Stream => open_stream(path, open_mode, access)?,
    };

    ensure_length(&file, capacity, access)?;
    let region = map_region(&file, capacity, access)?;

    // Only the mapping survives past this point
    drop(file);
    Ok(region)
}

fn open_existing(path: &Path, access: AccessMode) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options
        .read(true)
        .write(access.stream_access() == StreamAccess::ReadWrite);
    share_reads_only(&mut options);
    options.open(path)
}

fn open_stream(path: &Path, open_mode: OpenMode, access: AccessMode) -> io::Result<File> {
    let writable = access.stream_access() == StreamAccess::ReadWrite;
    let mut options = OpenOptions::new();
    options.read(true).write(writable);

    // std refuses create/truncate without write access; read-only callers
    // only reach here for files that already exist
    if open_mode == OpenMode::CreateNew {
        options.create_new(true);
    } else {
        options
            .create(writable && open_mode.creates())
            .truncate(open_mode.truncates());
    }

    share_reads_only(&mut options);
    options.open(path)
}

/// Other readers may share the file, writers may not. Unix has no
/// mandatory sharing modes so this only applies on Windows. Handles
/// opened by std are never inherited by child processes.
fn share_reads_only(options: &mut OpenOptions) {
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        const FILE_SHARE_READ: u32 = 0x0000_0001;
        options.share_mode(FILE_SHARE_READ);
    }
    #[cfg(not(windows))]
    let _ = options;
}

/// Grow the file so that the whole mapping is backed by it
fn ensure_length(file: &File, capacity: u64, access: AccessMode) -> Result<()> {
    let len = file.metadata()?.len();
    if len >= capacity {
        return Ok(());
    }
    if access.stream_access() == StreamAccess::ReadOnly {
        return Err(Error::InvalidAccess {
            requested: AccessMode::Write,
            allowed: access,
        });
    }
    file.set_len(capacity)?;
    Ok(())
}

fn map_region(file: &File, capacity: u64, access: AccessMode) -> Result<MmapRaw> {
    let len = fit_usize(capacity)?;

    let mut options = MmapOptions::new();
    options.len(len);

    // Write-only is enforced per view; pages are mapped read-write because
    // most platforms cannot express write-only protection.
    let region = match access.protection() {
        Protection::ReadOnly => options.map_raw_read_only(file)?,
        Protection::WriteOnly | Protection::ReadWrite => options.map_raw(file)?,
    };
    Ok(region)
}
