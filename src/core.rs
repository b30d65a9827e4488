//! Core runtime logic for dirview.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory snapshots (see [load_snapshot], [FileRecord], [DirectorySnapshot]).
//! - [meta]: per-entry metadata lookups.
//! - [formatter]: sort order, name escaping, permission and time strings.
//! - [layout]: column widths and cell truncation.
//! - [input]: raw byte decoding into commands.
//! - [signal]: the resize flag.
//! - [terminal]: terminal setup/teardown and the main event loop.
//! - [export]: the listing written when stdout is not a terminal.

pub mod export;
pub mod fm;
pub mod formatter;
pub mod input;
pub mod layout;
pub mod meta;
pub mod signal;
pub mod terminal;

pub use fm::{DirectorySnapshot, FileRecord, load_snapshot};
pub use formatter::{Formatter, add_backslash, format_permissions, format_timestamp};
pub use meta::{EntryMeta, FileKind};
