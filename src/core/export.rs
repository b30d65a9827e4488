//! Non-interactive listing for dirview.
//!
//! When standard output is not a terminal, dirview writes the start path, a
//! header line, and then every directory below it depth-first: each
//! directory's non-directory entries first, then its subdirectories in order.
//! Cells are padded to fixed terminal-column widths and never truncated or scrolled.

use crate::core::layout::{COLUMN_COUNT, COLUMN_TITLES, display_width};
use crate::core::{FileKind, FileRecord, load_snapshot};
use crate::utils::readable_path;

use tracing::{debug, warn};

use std::io::{self, Write};
use std::path::Path;

/// Minimum width of each column in the listing.
pub const DUMP_WIDTHS: [usize; COLUMN_COUNT] = [57, 19, 19, 19, 19, 19, 19];

/// Counts gathered while writing a listing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DumpSummary {
    pub directories: usize,
    pub rows: usize,
    /// Directories that could not be listed plus entries that were skipped.
    pub failures: usize,
}

/// Writes the listing of `root` to `out`.
///
/// Directory and entry failures are reported on stderr and in the log and do
/// not stop the walk. Only a failure to write to `out` is an error.
pub fn write_dump<W: Write>(root: &Path, out: &mut W) -> io::Result<DumpSummary> {
    writeln!(out, "{}", readable_path(root))?;
    write_row(out, COLUMN_TITLES.iter().copied())?;

    let mut summary = DumpSummary::default();
    dump_dir(root, out, &mut summary)?;
    debug!(?summary, "listing written");
    Ok(summary)
}

fn dump_dir<W: Write>(path: &Path, out: &mut W, summary: &mut DumpSummary) -> io::Result<()> {
    let snapshot = match load_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            report(&e);
            summary.failures += 1;
            return Ok(());
        }
    };
    summary.directories += 1;
    for e in snapshot.skipped() {
        report(e);
        summary.failures += 1;
    }

    for record in snapshot.entries().iter().filter(|r| !is_subdir(r)) {
        write_row(out, (0..COLUMN_COUNT).map(|idx| record.column(idx)))?;
        summary.rows += 1;
    }

    for record in snapshot.entries().iter().filter(|r| is_subdir(r)) {
        dump_dir(&path.join(record.raw_name()), out, summary)?;
    }
    Ok(())
}

/// Symlinks are listed as rows and never followed.
fn is_subdir(record: &FileRecord) -> bool {
    record.kind() == FileKind::Directory
}

fn write_row<'s, W: Write>(out: &mut W, cells: impl Iterator<Item = &'s str>) -> io::Result<()> {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.write_all(b"|")?;
        }
        let pad = DUMP_WIDTHS[idx].saturating_sub(display_width(cell));
        write!(out, "{cell}{:pad$}", "")?;
    }
    out.write_all(b"\n")
}

fn report(e: &dyn std::error::Error) {
    warn!(error = %e, "listing incomplete");
    eprintln!("[dirview] {}", e);
}
