//! Application state for dirview.
//!
//! [AppState] is the whole session: the configuration, the current directory
//! and its snapshot, the [Viewport] into it and the status line message.
//! It is passed explicitly to the input handlers and to the renderer.

use crate::app::nav::{ScrollLimits, Viewport};
use crate::config::Config;
use crate::core::layout::{
    COLUMN_COUNT, COLUMN_TITLES, ColumnWidths, compute_widths, max_scroll, viewport_height,
};
use crate::core::{DirectorySnapshot, load_snapshot};
use crate::error::SessionError;
use crate::utils::readable_path;

use tracing::warn;

use std::path::{Path, PathBuf};

/// Result of handling one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    /// State changed; the screen must be redrawn.
    Redraw,
    /// Nothing changed.
    Unchanged,
    Quit,
}

pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) current_dir: PathBuf,
    pub(super) snapshot: DirectorySnapshot,
    pub(super) viewport: Viewport,
    pub(super) status: Option<String>,
}

impl<'a> AppState<'a> {
    /// Starts in the process working directory.
    pub fn new(config: &'a Config) -> Result<Self, SessionError> {
        let current_dir = std::env::current_dir().map_err(SessionError::WorkingDir)?;
        Ok(Self::from_dir(config, &current_dir))
    }

    /// Starts in `path`. A directory that cannot be listed gives an empty
    /// table and a status message instead of an error.
    pub fn from_dir(config: &'a Config, path: &Path) -> Self {
        let mut app = Self {
            config,
            current_dir: path.to_path_buf(),
            snapshot: DirectorySnapshot::default(),
            viewport: Viewport::new(),
            status: None,
        };

        match load_snapshot(path) {
            Ok(snapshot) => app.replace_snapshot(path.to_path_buf(), snapshot),
            Err(e) => {
                warn!(error = %e, "initial load failed");
                app.status = Some(e.to_string());
            }
        }
        app
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn snapshot(&self) -> &DirectorySnapshot {
        &self.snapshot
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Text of the path line.
    pub fn path_text(&self) -> String {
        readable_path(&self.current_dir)
    }

    pub(crate) fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    /// Installs a freshly loaded directory and resets the viewport.
    pub(super) fn replace_snapshot(&mut self, path: PathBuf, snapshot: DirectorySnapshot) {
        self.status = skipped_message(&snapshot);
        self.current_dir = path;
        self.snapshot = snapshot;
        self.viewport.reset();
    }

    /// Brings the viewport in line with a `width` x `rows` terminal.
    ///
    /// Rows are settled first, since the column limits depend on which rows are visible.
    pub fn settle_viewport(&mut self, width: u16, rows: u16) {
        let height = viewport_height(rows);
        let count = self.snapshot.count();
        self.viewport.settle_rows(count, height);

        let limits = self.scroll_limits(&compute_widths(width), width as usize, height);
        self.viewport.clamp_offsets(&limits);
    }

    /// Largest useful offsets: per column the widest overflow among the header
    /// and the visible rows, for the path its overflow against the full width.
    fn scroll_limits(&self, widths: &ColumnWidths, width: usize, height: usize) -> ScrollLimits {
        let mut columns = [0usize; COLUMN_COUNT];
        for (idx, limit) in columns.iter_mut().enumerate() {
            *limit = max_scroll(COLUMN_TITLES[idx], widths[idx]);
        }

        let range = self.viewport.visible_range(self.snapshot.count(), height);
        for record in &self.snapshot.entries()[range] {
            for (idx, limit) in columns.iter_mut().enumerate() {
                *limit = (*limit).max(max_scroll(record.column(idx), widths[idx]));
            }
        }

        ScrollLimits {
            columns,
            path: max_scroll(&self.path_text(), width),
        }
    }
}

fn skipped_message(snapshot: &DirectorySnapshot) -> Option<String> {
    let skipped = snapshot.skipped();
    let first = skipped.first()?;
    Some(match skipped.len() {
        1 => format!("1 entry skipped: {first}"),
        n => format!("{n} entries skipped, first: {first}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn starts_with_sorted_snapshot() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("b.txt"))?;
        fs::create_dir(dir.path().join("a_dir"))?;
        let config = Config::default();

        let app = AppState::from_dir(&config, dir.path());
        assert_eq!(app.current_dir(), dir.path());
        assert_eq!(app.snapshot().count(), 2);
        assert_eq!(app.snapshot().entries()[0].display_name(), "a_dir");
        assert!(app.status().is_none());
        Ok(())
    }

    #[test]
    fn unreadable_start_directory_reports_status() {
        let config = Config::default();
        let app = AppState::from_dir(&config, Path::new("/path/does/not/exist"));
        assert!(app.snapshot().is_empty());
        assert!(app.status().is_some_and(|s| s.contains("/path/does/not/exist")));
    }

    #[test]
    fn settle_clamps_column_scroll_to_visible_text() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a_rather_long_file_name_here.txt"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());

        for _ in 0..100 {
            app.viewport.column_right();
            app.viewport.path_right();
        }
        // 80 columns: the name column is 24 wide, the name 32 long.
        app.settle_viewport(80, 24);
        assert_eq!(app.viewport().column_scroll()[0], 32 - 24);
        let path_len = app.path_text().chars().count();
        assert_eq!(app.viewport().path_scroll(), path_len.saturating_sub(80));
        Ok(())
    }

    #[test]
    fn settle_keeps_cursor_visible_after_shrink() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in 0..30 {
            File::create(dir.path().join(format!("file_{i:02}")))?;
        }
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        for _ in 0..20 {
            app.viewport.cursor_down(30, 27);
        }
        app.settle_viewport(80, 8);

        let vp = app.viewport();
        assert_eq!(vp.cursor(), 20);
        assert!(vp.scroll() <= vp.cursor() && vp.cursor() < vp.scroll() + 5);
        Ok(())
    }
}
