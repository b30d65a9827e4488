//! main.rs
//! Entry point for dirview

use dirview_tui::app::AppState;
use dirview_tui::config::Config;
use dirview_tui::core::{export, terminal};
use dirview_tui::error::SessionError;
use dirview_tui::utils::cli::{CliAction, handle_args};
use dirview_tui::utils::logging;

use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = terminal::restore_terminal();

        eprintln!("\n[dirview] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    match handle_args() {
        CliAction::RunApp => {}
        CliAction::Exit => return ExitCode::SUCCESS,
        CliAction::Fail => return ExitCode::FAILURE,
    }

    let config = Config::load();
    let _log_guard = logging::init(config.general());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.exit_code(), "fatal");
            eprintln!("[dirview] {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config: &Config) -> Result<(), SessionError> {
    if !io::stdout().is_terminal() {
        let start = std::env::current_dir().map_err(SessionError::WorkingDir)?;
        return write_listing(&start);
    }

    let mut app = AppState::new(config)?;
    terminal::run_terminal(&mut app)
}

/// Writes the recursive listing to stdout. A closed pipe ends it quietly.
fn write_listing(start: &Path) -> Result<(), SessionError> {
    let mut out = BufWriter::new(io::stdout().lock());
    let result = export::write_dump(start, &mut out).and_then(|_| out.flush());
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(SessionError::Output),
    }
}
