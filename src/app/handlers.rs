//! Command handler methods for dirview.
//!
//! Implements the [AppState] methods that apply one decoded [Command]:
//! viewport movement and directory navigation.

use crate::app::keymap::{Command, is_state_changing};
use crate::app::state::{AppState, KeypressResult};
use crate::core::load_snapshot;
use crate::error::NavError;

use tracing::{debug, info, warn};

use std::env;
use std::path::Path;

impl<'a> AppState<'a> {
    /// Applies `command` for a table `height` rows tall.
    ///
    /// Any command that can change the screen clears the previous status
    /// message first; a failed navigation sets a new one.
    pub fn handle_command(&mut self, command: Command, height: usize) -> KeypressResult {
        let had_status = self.status.is_some();
        if is_state_changing(command) {
            self.status = None;
        }

        let count = self.snapshot.count();
        let changed = match command {
            Command::Quit => return KeypressResult::Quit,
            Command::Resize => true,
            Command::Noop => false,
            Command::CursorUp => self.viewport.cursor_up(),
            Command::CursorDown => self.viewport.cursor_down(count, height),
            Command::ColumnLeft => self.viewport.column_left(),
            Command::ColumnRight => self.viewport.column_right(),
            Command::SelectPrevColumn => self.viewport.select_prev_column(),
            Command::SelectNextColumn => self.viewport.select_next_column(),
            Command::PathScrollLeft => self.viewport.path_left(),
            Command::PathScrollRight => self.viewport.path_right(),
            Command::EnterDirectory => self.enter_selected(),
            Command::ParentDirectory => self.enter_parent(),
        };

        if changed || had_status != self.status.is_some() {
            KeypressResult::Redraw
        } else {
            KeypressResult::Unchanged
        }
    }

    /// Enters the entry under the cursor if it is a directory.
    fn enter_selected(&mut self) -> bool {
        let Some(record) = self.snapshot.get(self.viewport.cursor()) else {
            return false;
        };
        if !record.is_dir() {
            return false;
        }
        let target = self.current_dir.join(record.raw_name());
        self.navigate(&target)
    }

    /// At the root this reloads the root.
    fn enter_parent(&mut self) -> bool {
        let target = self
            .current_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.current_dir.clone());
        self.navigate(&target)
    }

    fn navigate(&mut self, target: &Path) -> bool {
        match self.try_change_dir(target) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %target.display(), error = %e, "navigation failed");
                self.set_status(e.to_string());
                true
            }
        }
    }

    /// Changes the process working directory to `target` and loads it.
    ///
    /// The new snapshot is only installed once it loaded; on any failure the
    /// working directory is moved back and the session is left as it was.
    pub fn try_change_dir(&mut self, target: &Path) -> Result<(), NavError> {
        env::set_current_dir(target).map_err(|source| NavError::AccessDenied {
            path: target.to_path_buf(),
            source,
        })?;

        let loaded = env::current_dir()
            .map_err(NavError::WorkingDir)
            .and_then(|resolved| Ok((load_snapshot(&resolved)?, resolved)));

        match loaded {
            Ok((snapshot, resolved)) => {
                info!(path = %resolved.display(), entries = snapshot.count(), "changed directory");
                self.replace_snapshot(resolved, snapshot);
                Ok(())
            }
            Err(e) => {
                self.restore_working_dir();
                Err(e)
            }
        }
    }

    fn restore_working_dir(&self) {
        let previous = &self.current_dir;
        if let Err(e) = env::set_current_dir(previous) {
            debug!(path = %previous.display(), error = %e, "cannot return to previous directory");
        }
    }
}
