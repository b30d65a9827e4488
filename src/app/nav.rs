//! Viewport state for dirview.
//!
//! [Viewport] holds the cursor, the vertical scroll offset, the horizontal
//! scroll offsets of the path line and of every column, and the active column.
//! Transitions are total: each returns whether anything changed and never fails.

use crate::core::layout::COLUMN_COUNT;

use std::ops::Range;

/// Upper bounds for the horizontal offsets, derived from the current geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollLimits {
    pub columns: [usize; COLUMN_COUNT],
    pub path: usize,
}

/// Cursor and scroll positions into the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    cursor: usize,
    scroll: usize,
    column_scroll: [usize; COLUMN_COUNT],
    path_scroll: usize,
    active_column: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    // Accessors

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[inline]
    pub fn column_scroll(&self) -> &[usize; COLUMN_COUNT] {
        &self.column_scroll
    }

    #[inline]
    pub fn path_scroll(&self) -> usize {
        self.path_scroll
    }

    #[inline]
    pub fn active_column(&self) -> usize {
        self.active_column
    }

    /// Back to the top-left corner with the name column active.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Indices of the rows shown for `count` entries and `height` data rows.
    pub fn visible_range(&self, count: usize, height: usize) -> Range<usize> {
        let start = self.scroll.min(count);
        start..(start + height).min(count)
    }

    // Transitions

    pub fn cursor_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        true
    }

    pub fn cursor_down(&mut self, count: usize, height: usize) -> bool {
        if self.cursor + 1 >= count {
            return false;
        }
        self.cursor += 1;
        let height = height.max(1);
        if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
        true
    }

    pub fn column_left(&mut self) -> bool {
        let offset = &mut self.column_scroll[self.active_column];
        if *offset == 0 {
            return false;
        }
        *offset -= 1;
        true
    }

    /// Unbounded here; [Viewport::settle] pulls it back against the text on screen.
    pub fn column_right(&mut self) -> bool {
        self.column_scroll[self.active_column] += 1;
        true
    }

    pub fn select_prev_column(&mut self) -> bool {
        if self.active_column == 0 {
            return false;
        }
        self.active_column -= 1;
        true
    }

    pub fn select_next_column(&mut self) -> bool {
        if self.active_column + 1 >= COLUMN_COUNT {
            return false;
        }
        self.active_column += 1;
        true
    }

    pub fn path_left(&mut self) -> bool {
        if self.path_scroll == 0 {
            return false;
        }
        self.path_scroll -= 1;
        true
    }

    pub fn path_right(&mut self) -> bool {
        self.path_scroll += 1;
        true
    }

    /// Restores every invariant for the given geometry.
    ///
    /// Called before each draw, so a resize or a shorter snapshot never leaves
    /// the cursor off screen or an offset past the end of its text.
    pub fn settle(&mut self, count: usize, height: usize, limits: &ScrollLimits) {
        self.settle_rows(count, height);
        self.clamp_offsets(limits);
    }

    /// Vertical half of [Viewport::settle]: cursor in range and on screen.
    pub fn settle_rows(&mut self, count: usize, height: usize) {
        let height = height.max(1);
        if count == 0 {
            self.cursor = 0;
            self.scroll = 0;
        } else {
            self.cursor = self.cursor.min(count - 1);
            self.scroll = self.scroll.min(count.saturating_sub(height));
            if self.cursor < self.scroll {
                self.scroll = self.cursor;
            }
            if self.cursor >= self.scroll + height {
                self.scroll = self.cursor + 1 - height;
            }
        }
    }

    /// Horizontal half of [Viewport::settle].
    pub fn clamp_offsets(&mut self, limits: &ScrollLimits) {
        for (offset, limit) in self.column_scroll.iter_mut().zip(limits.columns) {
            *offset = (*offset).min(limit);
        }
        self.path_scroll = self.path_scroll.min(limits.path);
    }
}
