//! Terminal session and event loop for dirview.
//!
//! Handles setup/teardown of raw mode, alternate screen and the resize
//! handler, then loops: read one key, apply it, redraw when something changed.

use crate::app::keymap::Command;
use crate::app::{AppState, KeypressResult};
use crate::core::input::{ByteSource, TtyInput, decode};
use crate::core::layout::viewport_height;
use crate::core::signal::{install_resize_handler, take_resize};
use crate::error::SessionError;
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, error, trace};

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Set once [run_terminal] has entered raw mode, cleared by [restore_terminal].
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Runs the interactive browser until quit.
///
/// The terminal is restored on every path out of here, including errors.
/// A failure inside the loop takes precedence over a failure to restore.
pub fn run_terminal(app: &mut AppState) -> Result<(), SessionError> {
    install_resize_handler()?;
    let mut input = TtyInput::stdin(app.config().general().escape_timeout())?;
    terminal::size().map_err(SessionError::TerminalSize)?;

    enable_raw_mode().map_err(SessionError::RawMode)?;
    RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = restore_terminal();
        return Err(SessionError::RawMode(e));
    }

    let result = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(mut terminal) => event_loop(&mut terminal, app, &mut input),
        Err(e) => Err(SessionError::Draw(e)),
    };
    if let Err(e) = &result {
        error!(error = %e, "session aborted");
    }

    result.and(restore_terminal())
}

/// Leaves the alternate screen, shows the cursor and turns raw mode off.
/// Both steps are attempted even if the first fails.
///
/// Does nothing unless [run_terminal] set the terminal up, so a panic while
/// writing the listing leaves stdout alone.
pub fn restore_terminal() -> Result<(), SessionError> {
    restore_to(&mut io::stdout())
}

fn restore_to<W: Write>(out: &mut W) -> Result<(), SessionError> {
    if !RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let screen = execute!(out, LeaveAlternateScreen, Show);
    let mode = disable_raw_mode();
    screen.and(mode).map_err(SessionError::Restore)
}

/// Main loop of dirview: decode, apply, redraw. Returns on quit.
///
/// The resize flag is checked before every read and again after it.
fn event_loop<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    input: &mut S,
) -> Result<(), SessionError>
where
    B: Backend,
    B::Error: Into<BoxError>,
    S: ByteSource,
{
    draw(terminal, app)?;

    loop {
        // A resize that landed during the last draw has no read left to interrupt.
        if take_resize() {
            trace!("resize before read");
            draw(terminal, app)?;
        }

        let mut command = decode(input);
        let resized = take_resize();
        if resized && command == Command::Noop {
            command = Command::Resize;
        }
        trace!(?command, resized, "command");

        let rows = terminal_rows(terminal)?;
        match app.handle_command(command, viewport_height(rows)) {
            KeypressResult::Quit => break,
            KeypressResult::Redraw => draw(terminal, app)?,
            KeypressResult::Unchanged if resized => draw(terminal, app)?,
            KeypressResult::Unchanged => {}
        }
    }
    debug!("quit");
    Ok(())
}

fn draw<B>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<(), SessionError>
where
    B: Backend,
    B::Error: Into<BoxError>,
{
    terminal
        .draw(|frame| ui::render(frame, app))
        .map(|_| ())
        .map_err(|e| SessionError::Draw(io::Error::other(e)))
}

fn terminal_rows<B>(terminal: &Terminal<B>) -> Result<u16, SessionError>
where
    B: Backend,
    B::Error: Into<BoxError>,
{
    let size = terminal
        .size()
        .map_err(|e| SessionError::TerminalSize(io::Error::other(e)))?;
    Ok(size.height)
}
