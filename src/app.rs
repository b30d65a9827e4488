//! Application state and input handling for dirview.
//!
//! - [keymap]: the [Command] set and the key tables
//! - [nav]: the [Viewport] state machine
//! - [state]: [AppState], the explicit session state
//! - [handlers]: applying commands to [AppState]

pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod state;

pub use keymap::Command;
pub use nav::{ScrollLimits, Viewport};
pub use state::{AppState, KeypressResult};
