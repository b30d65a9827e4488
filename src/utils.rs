//! Miscellaneous utilities for dirview.
//!
//! - [cli]: command-line flags
//! - [helpers]: color parsing and path helpers
//! - [logging]: log file subscriber

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{get_home, parse_color, readable_path};
