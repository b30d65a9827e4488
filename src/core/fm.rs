//! Directory snapshots for dirview.
//!
//! Provides the [FileRecord] struct used throughout dirview and [load_snapshot],
//! which lists one directory into a sorted, immutable [DirectorySnapshot].
//! A snapshot is never edited; navigation replaces it as a whole.

use crate::core::formatter::{Formatter, add_backslash};
use crate::core::meta::{EntryMeta, FileKind};
use crate::error::{MetaError, SnapshotError};

use tracing::{debug, warn};

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

/// One row of the table.
///
/// Holds the escaped display name, the raw on-disk name used to build paths,
/// and the display strings of the remaining columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    display_name: String,
    raw_name: Box<OsStr>,
    meta: EntryMeta,
}

impl FileRecord {
    pub fn new(raw_name: OsString, meta: EntryMeta) -> Self {
        FileRecord {
            display_name: add_backslash(&raw_name.to_string_lossy()),
            raw_name: raw_name.into_boxed_os_str(),
            meta,
        }
    }

    // Accessors

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[inline]
    pub fn raw_name(&self) -> &OsStr {
        &self.raw_name
    }

    #[inline]
    pub fn kind(&self) -> FileKind {
        self.meta.kind
    }

    #[inline]
    pub fn owner(&self) -> &str {
        &self.meta.owner
    }

    #[inline]
    pub fn group(&self) -> &str {
        &self.meta.group
    }

    #[inline]
    pub fn permissions(&self) -> &str {
        &self.meta.permissions
    }

    #[inline]
    pub fn mtime(&self) -> &str {
        &self.meta.mtime
    }

    #[inline]
    pub fn atime(&self) -> &str {
        &self.meta.atime
    }

    /// True for directories and symlinks to directories; these sort first and can be entered.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.meta.kind == FileKind::Directory || self.meta.points_to_dir
    }

    /// Text of table column `idx` (0 = name ... 6 = atime).
    pub fn column(&self, idx: usize) -> &str {
        match idx {
            0 => self.display_name(),
            1 => self.meta.kind.label(),
            2 => self.owner(),
            3 => self.group(),
            4 => self.permissions(),
            5 => self.mtime(),
            6 => self.atime(),
            _ => "",
        }
    }
}

/// The sorted entries of one directory, plus the entries that had to be left out.
#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    entries: Vec<FileRecord>,
    skipped: Vec<MetaError>,
}

impl DirectorySnapshot {
    #[inline]
    pub fn entries(&self) -> &[FileRecord] {
        &self.entries
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&FileRecord> {
        self.entries.get(idx)
    }

    /// Metadata failures of entries that were dropped during the load.
    #[inline]
    pub fn skipped(&self) -> &[MetaError] {
        &self.skipped
    }
}

/// Lists `path` into a sorted snapshot.
///
/// Entries whose metadata cannot be collected are skipped and recorded in
/// [DirectorySnapshot::skipped]; only a directory that cannot be listed at all is an error.
pub fn load_snapshot(path: &Path) -> Result<DirectorySnapshot, SnapshotError> {
    let reader = fs::read_dir(path).map_err(|source| SnapshotError::DirectoryOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::with_capacity(256);
    let mut skipped = Vec::new();

    for entry in reader {
        let entry = entry.map_err(|source| SnapshotError::DirectoryRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();

        match EntryMeta::collect(&entry.path()) {
            Ok(meta) => entries.push(FileRecord::new(name, meta)),
            Err(e) => {
                warn!(error = %e, "skipping entry");
                skipped.push(e);
            }
        }
    }

    Formatter::new().sort_records(&mut entries);
    debug!(
        path = %path.display(),
        count = entries.len(),
        skipped = skipped.len(),
        "directory loaded"
    );
    Ok(DirectorySnapshot { entries, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn names(snapshot: &DirectorySnapshot) -> Vec<String> {
        snapshot
            .entries()
            .iter()
            .map(|r| r.display_name().to_string())
            .collect()
    }

    #[test]
    fn snapshot_sorts_directories_first() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("b.txt"))?;
        File::create(dir.path().join("a.txt"))?;
        fs::create_dir(dir.path().join("Z"))?;

        let snapshot = load_snapshot(dir.path())?;
        assert_eq!(names(&snapshot), ["Z", "a.txt", "b.txt"]);
        assert_eq!(snapshot.count(), 3);
        assert!(snapshot.skipped().is_empty());
        Ok(())
    }

    #[test]
    fn snapshot_partition_holds_for_mixed_names() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for name in ["m", "c", "x", "A"] {
            fs::create_dir(dir.path().join(format!("dir_{name}")))?;
            File::create(dir.path().join(format!("file_{name}")))?;
        }

        let snapshot = load_snapshot(dir.path())?;
        let entries = snapshot.entries();
        let first_file = entries.iter().position(|e| !e.is_dir()).unwrap_or(entries.len());
        assert!(entries[..first_file].iter().all(FileRecord::is_dir));
        assert!(entries[first_file..].iter().all(|e| !e.is_dir()));
        for window in entries[..first_file].windows(2) {
            assert!(window[0].raw_name() < window[1].raw_name());
        }
        for window in entries[first_file..].windows(2) {
            assert!(window[0].raw_name() < window[1].raw_name());
        }
        Ok(())
    }

    #[test]
    fn empty_directory_is_valid() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let snapshot = load_snapshot(dir.path())?;
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.count(), 0);
        assert!(snapshot.get(0).is_none());
        Ok(())
    }

    #[test]
    fn names_are_escaped_but_raw_names_kept() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a<b>c"))?;

        let snapshot = load_snapshot(dir.path())?;
        let record = snapshot.get(0).ok_or("missing entry")?;
        assert_eq!(record.display_name(), "a\\<b\\>c");
        assert_eq!(record.raw_name(), OsStr::new("a<b>c"));
        assert_eq!(record.column(0), "a\\<b\\>c");
        assert_eq!(record.column(1), "regular file");
        Ok(())
    }

    #[test]
    fn symlinked_directory_sorts_with_directories() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("real"))?;
        File::create(dir.path().join("a_file"))?;
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link"))?;

        let snapshot = load_snapshot(dir.path())?;
        assert_eq!(names(&snapshot), ["link", "real", "a_file"]);
        assert_eq!(snapshot.entries()[0].kind(), FileKind::Symlink);
        Ok(())
    }

    #[test]
    fn missing_directory_is_open_error() {
        let result = load_snapshot(&PathBuf::from("/path/does/not/exist"));
        assert!(matches!(result, Err(SnapshotError::DirectoryOpen { .. })));
    }

    #[test]
    fn file_is_not_a_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("plain");
        File::create(&file)?;
        assert!(load_snapshot(&file).is_err());
        Ok(())
    }
}
