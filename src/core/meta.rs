//! Metadata collection for single directory entries.
//!
//! Turns a path into the display strings of one table row: kind, owner, group,
//! permissions and the two timestamps. Everything here is plain OS plumbing;
//! [crate::core::fm] decides what to do when a lookup fails.

use crate::core::formatter::{format_permissions, format_timestamp};
use crate::error::MetaError;

use nix::unistd::{Gid, Group, Uid, User};

use std::fs::{self, FileType, Metadata};
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::Path;

/// Kind of a filesystem object, as shown in the type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileKind {
    Directory,
    Regular,
    Symlink,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    #[default]
    Unknown,
}

impl FileKind {
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_file() {
            FileKind::Regular
        } else if ft.is_symlink() {
            FileKind::Symlink
        } else if ft.is_block_device() {
            FileKind::BlockDevice
        } else if ft.is_char_device() {
            FileKind::CharDevice
        } else if ft.is_fifo() {
            FileKind::Fifo
        } else if ft.is_socket() {
            FileKind::Socket
        } else {
            FileKind::Unknown
        }
    }

    /// Text of the type column.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Directory => "directory",
            FileKind::Regular => "regular file",
            FileKind::Symlink => "symlink",
            FileKind::BlockDevice => "block device",
            FileKind::CharDevice => "character device",
            FileKind::Fifo => "FIFO",
            FileKind::Socket => "socket",
            FileKind::Unknown => "unknown",
        }
    }

    /// First character of the permission string.
    pub fn glyph(self) -> char {
        match self {
            FileKind::Directory => 'd',
            FileKind::Fifo => 'p',
            FileKind::Symlink => 'l',
            FileKind::BlockDevice => 'b',
            FileKind::CharDevice => 'c',
            FileKind::Socket => 's',
            FileKind::Regular | FileKind::Unknown => '-',
        }
    }
}

/// Display attributes of one entry as produced by [EntryMeta::collect].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMeta {
    pub kind: FileKind,
    /// True for directories and for symlinks whose target is a directory.
    pub points_to_dir: bool,
    pub owner: String,
    pub group: String,
    pub permissions: String,
    pub mtime: String,
    pub atime: String,
}

impl EntryMeta {
    /// Collects the display attributes of `path` without following a final symlink.
    ///
    /// A symlink is reported as such; `points_to_dir` tells whether it can be entered.
    pub fn collect(path: &Path) -> Result<Self, MetaError> {
        let md = fs::symlink_metadata(path).map_err(|source| MetaError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        let kind = FileKind::from_file_type(md.file_type());
        let points_to_dir = match kind {
            FileKind::Directory => true,
            FileKind::Symlink => fs::metadata(path).map(|t| t.is_dir()).unwrap_or(false),
            _ => false,
        };

        Ok(Self {
            kind,
            points_to_dir,
            owner: owner_name(path, &md)?,
            group: group_name(path, &md)?,
            permissions: format_permissions(kind, md.mode()),
            mtime: timestamp(path, md.mtime(), md.mtime_nsec())?,
            atime: timestamp(path, md.atime(), md.atime_nsec())?,
        })
    }
}

/// Resolves the owner's user name. Ids without a passwd entry are shown numerically.
fn owner_name(path: &Path, md: &Metadata) -> Result<String, MetaError> {
    let uid = md.uid();
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => Ok(user.name),
        Ok(None) => Ok(uid.to_string()),
        Err(source) => Err(MetaError::OwnerLookup {
            path: path.to_path_buf(),
            uid,
            source,
        }),
    }
}

/// Resolves the group name. Ids without a group entry are shown numerically.
fn group_name(path: &Path, md: &Metadata) -> Result<String, MetaError> {
    let gid = md.gid();
    match Group::from_gid(Gid::from_raw(gid)) {
        Ok(Some(group)) => Ok(group.name),
        Ok(None) => Ok(gid.to_string()),
        Err(source) => Err(MetaError::GroupLookup {
            path: path.to_path_buf(),
            gid,
            source,
        }),
    }
}

fn timestamp(path: &Path, secs: i64, nanos: i64) -> Result<String, MetaError> {
    format_timestamp(secs, nanos).ok_or_else(|| MetaError::TimeConversion {
        path: path.to_path_buf(),
        secs,
    })
}
