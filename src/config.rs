//! Configuration for dirview.
//!
//! - [general]: input timing and logging
//! - [theme]: colors of the path line, headers, cursor row and status line
//! - [load]: reading `dirview.toml` and writing the default file

pub mod general;
pub mod load;
pub mod theme;

pub use general::{General, InternalGeneral};
pub use load::{Config, RawConfig};
pub use theme::{ColorPair, Theme};
