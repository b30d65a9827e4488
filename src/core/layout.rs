//! Column layout and cell truncation for the dirview table.
//!
//! [compute_widths] splits the terminal width into the seven table columns and
//! [render_cell] fits one text field into a fixed-width cell, scrolling it
//! horizontally and marking hidden text with `<` and `>`.
//!
//! Widths and scroll offsets count terminal columns, measured with
//! `unicode-width`, so double-width characters keep the table aligned.

use unicode_width::UnicodeWidthChar;

/// Number of table columns.
pub const COLUMN_COUNT: usize = 7;

/// Header titles, in column order.
pub const COLUMN_TITLES: [&str; COLUMN_COUNT] = [
    "name",
    "type",
    "owner",
    "group",
    "permissions",
    "mtime",
    "atime",
];

/// Screen rows that are not data rows: path line, header line and status line.
pub const RESERVED_ROWS: usize = 3;

pub type ColumnWidths = [usize; COLUMN_COUNT];

/// Splits the terminal width into column widths.
///
/// The name column gets 30%, every other column 10% (floored). The remaining
/// tenth is left as padding for the six separators.
pub fn compute_widths(terminal_width: u16) -> ColumnWidths {
    let width = terminal_width as usize;
    let mut widths = [width / 10; COLUMN_COUNT];
    widths[0] = width * 3 / 10;
    widths
}

/// Number of data rows that fit on a terminal of `rows` lines (at least one).
pub fn viewport_height(rows: u16) -> usize {
    (rows as usize).saturating_sub(RESERVED_ROWS).max(1)
}

/// One terminal column of laid-out text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    /// First column of a glyph: its text (including any trailing zero-width
    /// characters) and its full width.
    Glyph(String, usize),
    /// Second column of a double-width glyph.
    Continuation,
}

impl Slot {
    fn blank() -> Self {
        Slot::Glyph(" ".to_string(), 1)
    }

    fn marker(c: char) -> Self {
        Slot::Glyph(c.to_string(), 1)
    }
}

/// Lays `text` out one slot per terminal column.
/// Control characters become `?`; leading zero-width characters are dropped.
fn layout_slots(text: &str) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(text.len());
    for c in text.chars() {
        let c = if c.is_control() { '?' } else { c };
        match c.width().unwrap_or(0) {
            0 => {
                let last_glyph = slots.iter_mut().rev().find_map(|slot| match slot {
                    Slot::Glyph(glyph, _) => Some(glyph),
                    Slot::Continuation => None,
                });
                if let Some(glyph) = last_glyph {
                    glyph.push(c);
                }
            }
            w => {
                slots.push(Slot::Glyph(c.to_string(), w));
                slots.extend(std::iter::repeat_n(Slot::Continuation, w - 1));
            }
        }
    }
    slots
}

/// Width of `text` in terminal columns, as [render_cell] lays it out.
pub fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if c.is_control() { 1 } else { c.width().unwrap_or(0) })
        .sum()
}

/// Largest useful scroll offset for `text` in a cell of `width` columns.
#[inline]
pub fn max_scroll(text: &str, width: usize) -> usize {
    display_width(text).saturating_sub(width)
}

/// Fits `text` into exactly `width` terminal columns.
///
/// Text that fits is left-justified and padded with spaces; `scroll` is ignored.
/// Longer text is windowed at column `scroll` (clamped to the last full window).
/// A `<` takes the first column when text is hidden on the left, a `>` the last
/// one when text is hidden on the right. Half of a double-width glyph cut by
/// the window edge is shown as a space.
/// Control characters are shown as `?`. A zero width yields an empty string.
pub fn render_cell(text: &str, width: usize, scroll: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let slots = layout_slots(text);
    let len = slots.len();

    if len <= width {
        let mut out = collect_slots(&slots);
        out.extend(std::iter::repeat_n(' ', width - len));
        return out;
    }

    let offset = scroll.min(len - width);
    let mut window = slots[offset..offset + width].to_vec();

    if window[0] == Slot::Continuation {
        window[0] = Slot::blank();
    }
    if matches!(window.last(), Some(Slot::Glyph(_, w)) if *w > 1) {
        window[width - 1] = Slot::blank();
    }

    if offset > 0 {
        put_marker(&mut window, 0, '<');
    }
    if offset + width < len {
        put_marker(&mut window, width - 1, '>');
    }
    collect_slots(&window)
}

/// Puts a one-column marker at `idx`, blanking whatever half glyph it splits.
fn put_marker(window: &mut [Slot], idx: usize, marker: char) {
    if let Slot::Glyph(_, w) = window[idx] {
        for slot in window.iter_mut().skip(idx + 1).take(w - 1) {
            *slot = Slot::blank();
        }
    } else if let Some(start) = window[..idx]
        .iter()
        .rposition(|slot| matches!(slot, Slot::Glyph(..)))
    {
        window[start] = Slot::blank();
        for slot in &mut window[start + 1..idx] {
            *slot = Slot::blank();
        }
    }
    window[idx] = Slot::marker(marker);
}

fn collect_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Glyph(glyph, _) => Some(glyph.as_str()),
            Slot::Continuation => None,
        })
        .collect()
}
