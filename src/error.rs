//! Error types for dirview.
//!
//! Errors are split by how far they travel:
//! - [MetaError]: one entry's metadata could not be collected. The entry is dropped, the load goes on.
//! - [SnapshotError]: a whole directory could not be listed. Reported on the status line.
//! - [NavError]: a directory change was refused. Reported on the status line, state untouched.
//! - [SessionError]: the session cannot continue. Ends the process with [SessionError::exit_code].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of the metadata collaborator for a single directory entry.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("cannot stat {path:?}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot look up owner {uid} of {path:?}: {source}")]
    OwnerLookup {
        path: PathBuf,
        uid: u32,
        #[source]
        source: nix::Error,
    },

    #[error("cannot look up group {gid} of {path:?}: {source}")]
    GroupLookup {
        path: PathBuf,
        gid: u32,
        #[source]
        source: nix::Error,
    },

    #[error("cannot convert timestamp {secs} of {path:?} to local time")]
    TimeConversion { path: PathBuf, secs: i64 },
}

/// Failure to list a directory as a whole.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot open directory {path:?}: {source}")]
    DirectoryOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read directory {path:?}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of a directory change requested from the keyboard.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("access denied: {path:?} ({source})")]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot resolve working directory: {0}")]
    WorkingDir(#[source] io::Error),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Fatal errors of the interactive session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to query terminal size: {0}")]
    TerminalSize(#[source] io::Error),

    #[error("failed to switch terminal to raw mode: {0}")]
    RawMode(#[source] io::Error),

    #[error("failed to restore terminal mode: {0}")]
    Restore(#[source] io::Error),

    #[error("failed to install resize handler: {0}")]
    SignalInstall(#[source] nix::Error),

    #[error("failed to resolve working directory: {0}")]
    WorkingDir(#[source] io::Error),

    #[error("failed to draw to terminal: {0}")]
    Draw(#[source] io::Error),

    #[error("failed to open terminal input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write listing: {0}")]
    Output(#[source] io::Error),
}

impl SessionError {
    /// Process exit status for this failure. Normal quit exits with 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionError::TerminalSize(_) => 2,
            SessionError::RawMode(_) => 3,
            SessionError::Restore(_) => 4,
            SessionError::SignalInstall(_) => 5,
            SessionError::WorkingDir(_) => 6,
            SessionError::Draw(_) => 7,
            SessionError::Input(_) => 8,
            SessionError::Output(_) => 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exit_codes_are_distinct_and_nonzero() {
        let errors = [
            SessionError::TerminalSize(io::Error::other("x")),
            SessionError::RawMode(io::Error::other("x")),
            SessionError::Restore(io::Error::other("x")),
            SessionError::SignalInstall(nix::Error::EINVAL),
            SessionError::WorkingDir(io::Error::other("x")),
            SessionError::Draw(io::Error::other("x")),
            SessionError::Input(io::Error::other("x")),
            SessionError::Output(io::Error::other("x")),
        ];
        let codes: HashSet<u8> = errors.iter().map(SessionError::exit_code).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn snapshot_error_converts_into_nav_error() {
        let err = SnapshotError::DirectoryOpen {
            path: PathBuf::from("/nope"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let nav: NavError = err.into();
        assert!(matches!(nav, NavError::Snapshot(_)));
        assert!(nav.to_string().contains("/nope"));
    }
}
