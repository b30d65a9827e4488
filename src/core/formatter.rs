//! Sorting and display formatting for directory entries in dirview.
//!
//! The [Formatter] orders a snapshot: directories first, then byte-wise by on-disk name.
//! The free functions build the fixed-width display strings shown in the table:
//! escaped names, `drwxr-xr-x` style permissions and local timestamps.

use crate::core::{FileKind, FileRecord};

use chrono::{DateTime, Local, TimeZone};

use std::cmp::Ordering;

/// Timestamp layout used by the mtime and atime columns, e.g. `01.01.2000  12:30`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y  %H:%M";

/// Orders directory entries for display.
///
/// Entries that are (or point to) directories come first; within each group
/// names are compared byte-wise on the raw on-disk name.
#[derive(Debug, Default, Clone, Copy)]
pub struct Formatter;

impl Formatter {
    pub fn new() -> Self {
        Self
    }

    /// Comparison key used by [Formatter::sort_records].
    pub fn compare(a: &FileRecord, b: &FileRecord) -> Ordering {
        match (a.is_dir(), b.is_dir()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.raw_name().cmp(b.raw_name()),
        }
    }

    /// Sorts the given records in place.
    ///
    /// Names are unique within one directory so an unstable sort is enough.
    pub fn sort_records(&self, records: &mut [FileRecord]) {
        records.sort_unstable_by(Self::compare);
    }
}

/// Escapes `<` and `>` with a leading backslash.
///
/// The table uses bare `<` and `>` as scroll markers, so names must not contain them unescaped.
/// Applying this twice escapes the backslashes' neighbours again; call it once per name.
pub fn add_backslash(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c == '<' || c == '>' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Formats a unix mode as a 10 character permission string like `drwxr-xr-x`.
///
/// The first character is the type glyph of `kind`, the remaining nine are the
/// owner/group/other read, write and execute bits.
pub fn format_permissions(kind: FileKind, mode: u32) -> String {
    let mut chars = [kind.glyph(), '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    let shifts = [6, 3, 0];
    for (i, &shift) in shifts.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Converts a unix timestamp to the local time display string.
/// # Returns
/// None when the timestamp has no unambiguous local representation.
pub fn format_timestamp(secs: i64, nanos: i64) -> Option<String> {
    let nanos = u32::try_from(nanos).unwrap_or(0);
    let local: DateTime<Local> = Local.timestamp_opt(secs, nanos).single()?;
    Some(local.format(TIMESTAMP_FORMAT).to_string())
}
