//! UI renderer implementation.
//!
//! [render] draws one full frame: the path line, the column headers, the
//! visible table rows and the status line. It settles the viewport against the
//! frame size first, so every offset it reads is valid for this geometry.
//!
//! This module stays pure rendering: it reads state + config and produces widgets.

use crate::app::AppState;
use crate::core::layout::{COLUMN_COUNT, COLUMN_TITLES, compute_widths, render_cell};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Drawn between two table cells.
pub const SEPARATOR: &str = "|";

/// Screen rows above the table: path line and header line.
const TABLE_TOP: u16 = 2;

/// Renders the entire screen for the current state.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    app.settle_viewport(area.width, area.height);
    let app: &AppState = app;

    let theme = app.config().theme();
    let viewport = app.viewport();
    let widths = compute_widths(area.width);
    let scrolls = viewport.column_scroll();

    // Path line
    let path = render_cell(
        &app.path_text(),
        area.width as usize,
        viewport.path_scroll(),
    );
    frame.render_widget(
        Paragraph::new(Line::styled(path, theme.path_style())),
        row_rect(area, 0),
    );

    // Header line
    if area.height > 1 {
        let header = table_line((0..COLUMN_COUNT).map(|idx| {
            let style = if idx == viewport.active_column() {
                theme.active_header_style()
            } else {
                theme.header_style()
            };
            (
                render_cell(COLUMN_TITLES[idx], widths[idx], scrolls[idx]),
                style,
            )
        }));
        frame.render_widget(Paragraph::new(header), row_rect(area, 1));
    }

    // Table rows, leaving the last line to the status when there is room for both
    let has_status_line = area.height > TABLE_TOP + 1;
    let table_end = if has_status_line {
        area.height - 1
    } else {
        area.height
    };
    let height = table_end.saturating_sub(TABLE_TOP) as usize;
    let snapshot = app.snapshot();
    let range = viewport.visible_range(snapshot.count(), height);

    for (offset, idx) in range.enumerate() {
        let Some(record) = snapshot.get(idx) else {
            break;
        };
        let mut line = table_line((0..COLUMN_COUNT).map(|col| {
            (
                render_cell(record.column(col), widths[col], scrolls[col]),
                Style::default(),
            )
        }));
        if idx == viewport.cursor() {
            line = line.style(theme.selection_style());
        }
        frame.render_widget(
            Paragraph::new(line),
            row_rect(area, TABLE_TOP + offset as u16),
        );
    }

    // Status line
    if has_status_line && let Some(status) = app.status() {
        let text = render_cell(status, area.width as usize, 0);
        frame.render_widget(
            Paragraph::new(Line::styled(text, theme.status_style())),
            row_rect(area, area.height - 1),
        );
    }
}

/// Joins styled cells with [SEPARATOR].
fn table_line(cells: impl Iterator<Item = (String, Style)>) -> Line<'static> {
    let mut spans = Vec::with_capacity(COLUMN_COUNT * 2);
    for (idx, (text, style)) in cells.enumerate() {
        if idx > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

fn row_rect(area: Rect, row: u16) -> Rect {
    Rect {
        x: area.x,
        y: area.y + row,
        width: area.width,
        height: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keymap::Command;
    use crate::config::Config;

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};
    use std::error;
    use std::fs::{self, File};
    use std::path::Path;
    use tempfile::tempdir;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn draw(app: &mut AppState, width: u16, height: u16) -> Result<Buffer, Box<dyn error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        terminal.draw(|frame| render(frame, app))?;
        Ok(terminal.backend().buffer().clone())
    }

    #[test]
    fn draws_path_header_and_rows() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("b.txt"))?;
        File::create(dir.path().join("a.txt"))?;
        fs::create_dir(dir.path().join("Z"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());

        let buffer = draw(&mut app, 80, 10)?;

        assert!(row_text(&buffer, 0).starts_with(&app.path_text()));
        assert!(row_text(&buffer, 1).starts_with(&format!("{:<24}|{:<8}|{:<8}|", "name", "type", "owner")));
        assert!(row_text(&buffer, 2).starts_with(&format!("{:<24}|directo>|", "Z")));
        assert!(row_text(&buffer, 3).starts_with(&format!("{:<24}|regular>", "a.txt")));
        assert!(row_text(&buffer, 4).starts_with("b.txt"));
        assert_eq!(row_text(&buffer, 5).trim(), "");
        assert_eq!(row_text(&buffer, 9).trim(), "");
        Ok(())
    }

    #[test]
    fn cursor_row_and_active_header_are_highlighted() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("one"))?;
        File::create(dir.path().join("two"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        app.handle_command(Command::CursorDown, 7);
        app.handle_command(Command::SelectNextColumn, 7);

        let buffer = draw(&mut app, 80, 10)?;

        assert_eq!(buffer[(0, 3)].bg, Color::Indexed(212));
        assert_ne!(buffer[(0, 2)].bg, Color::Indexed(212));
        assert_eq!(buffer[(25, 1)].bg, Color::Indexed(198));
        assert_eq!(buffer[(0, 1)].fg, Color::Indexed(198));
        assert_ne!(buffer[(0, 1)].bg, Color::Indexed(198));
        Ok(())
    }

    #[test]
    fn long_names_get_scroll_markers() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("abcdefghijklmnopqrstuvwxyz0123456789"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());

        let buffer = draw(&mut app, 80, 10)?;
        assert!(row_text(&buffer, 2).starts_with("abcdefghijklmnopqrstuvw>|"));

        for _ in 0..5 {
            app.handle_command(Command::ColumnRight, 7);
        }
        let buffer = draw(&mut app, 80, 10)?;
        assert!(row_text(&buffer, 2).starts_with("<ghijklmnopqrstuvwxyz01>|"));

        for _ in 0..50 {
            app.handle_command(Command::ColumnRight, 7);
        }
        let buffer = draw(&mut app, 80, 10)?;
        assert!(row_text(&buffer, 2).starts_with("<nopqrstuvwxyz0123456789|"));
        assert_eq!(app.viewport().column_scroll()[0], 12);
        Ok(())
    }

    #[test]
    fn status_line_shows_diagnostic() -> Result<(), Box<dyn error::Error>> {
        let config = Config::default();
        let mut app = AppState::from_dir(&config, Path::new("/path/does/not/exist"));

        let buffer = draw(&mut app, 80, 6)?;
        assert!(row_text(&buffer, 5).starts_with("cannot open directory"));
        assert_eq!(buffer[(0, 5)].fg, Color::Yellow);
        Ok(())
    }

    #[test]
    fn resize_keeps_cursor_on_screen() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for i in 0..20 {
            File::create(dir.path().join(format!("f{i:02}")))?;
        }
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        for _ in 0..15 {
            app.handle_command(Command::CursorDown, 21);
        }

        let buffer = draw(&mut app, 80, 6)?;
        let shown: Vec<String> = (2..5).map(|y| row_text(&buffer, y)).collect();
        assert!(shown.iter().any(|row| row.starts_with("f15")), "{shown:?}");
        assert!(shown[2].starts_with("f15"));
        Ok(())
    }

    #[test]
    fn tiny_terminal_does_not_panic() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("x"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        for (w, h) in [(1, 1), (5, 2), (9, 3), (3, 4)] {
            draw(&mut app, w, h)?;
        }
        Ok(())
    }
}
