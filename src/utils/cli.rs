//! Command-line argument parsing and help for dirview.
//!
//! dirview takes no positional arguments: with no flags (`dv`) it browses the
//! current directory.

use crate::config::Config;

use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    /// Done, exit successfully.
    Exit,
    /// Bad usage or a failed `--init`, exit with status 1.
    Fail,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args, &Config::default_path())
}

/// Acts on `args` (without the program name). `config_path` is where `--init` writes.
pub fn parse_args(args: &[String], config_path: &Path) -> CliAction {
    let arg = match args {
        [] => return CliAction::RunApp,
        [arg] => arg.as_str(),
        _ => {
            eprintln!("Error: dirview accepts at most one option.");
            eprintln!("Usage: dv [OPTION]");
            return CliAction::Fail;
        }
    };

    match arg {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => match Config::generate_default(config_path) {
            Ok(()) => CliAction::Exit,
            Err(e) => {
                eprintln!("Error: {}", e);
                CliAction::Fail
            }
        },
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Fail
        }
    }
}

fn print_version() {
    println!("dirview {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"dirview - browse a directory as a scrollable table in the terminal

USAGE:
  dv [OPTION]

  Starts in the current directory. When standard output is not a terminal,
  prints a recursive listing of the current directory instead.

OPTIONS:
      --init              Generate the default configuration file
  -h, --help              Print help information
  -v, --version           Display the installed version of dirview

KEYS:
  Up / Down               Move the cursor
  Left / Right            Scroll the text of the active column
  [ / ]                   Select the previous / next column
  < / >                   Scroll the path line
  Enter                   Enter the directory under the cursor
  ^                       Go to the parent directory
  q, Q, Ctrl-D, Ctrl-C    Quit

ENVIRONMENT:
  DIRVIEW_CONFIG          Override the default config path
  DIRVIEW_LOG             Log filter (e.g. "debug"), overrides general.log_level
"#
    );
}
