//! Key mapping for dirview.
//!
//! Defines the [Command] enum every input is decoded into, and the static
//! byte tables the input decoder consults. Keys are fixed; there is no
//! keybinding configuration.

use phf::phf_map;

/// A logical command decoded from raw terminal input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the cursor one row up (arrow up).
    CursorUp,
    /// Move the cursor one row down (arrow down).
    CursorDown,
    /// Scroll the active column's text left (arrow left).
    ColumnLeft,
    /// Scroll the active column's text right (arrow right).
    ColumnRight,
    SelectPrevColumn,
    SelectNextColumn,
    PathScrollLeft,
    PathScrollRight,
    /// Enter the directory under the cursor.
    EnterDirectory,
    ParentDirectory,
    Quit,
    /// The terminal changed size; redraw without touching state.
    Resize,
    Noop,
}

/// The escape byte that starts an arrow key sequence.
pub const ESC: u8 = 0x1b;
/// Second byte of an arrow key sequence (`ESC [ X`).
pub const CSI: u8 = b'[';

/// Single-byte keys.
///
/// Raw mode delivers Enter as CR and turns Ctrl-C into a plain byte, so both
/// are mapped next to their line-mode counterparts.
pub(crate) static KEYMAP: phf::Map<u8, Command> = phf_map! {
    b'q' => Command::Quit,
    b'Q' => Command::Quit,
    b'\x04' => Command::Quit,
    b'\x03' => Command::Quit,
    b'<' => Command::PathScrollLeft,
    b'>' => Command::PathScrollRight,
    b'[' => Command::SelectPrevColumn,
    b']' => Command::SelectNextColumn,
    b'^' => Command::ParentDirectory,
    b'\n' => Command::EnterDirectory,
    b'\r' => Command::EnterDirectory,
};

/// Final byte of `ESC [ X` arrow sequences.
pub(crate) static ARROW_KEYS: phf::Map<u8, Command> = phf_map! {
    b'A' => Command::CursorUp,
    b'B' => Command::CursorDown,
    b'C' => Command::ColumnRight,
    b'D' => Command::ColumnLeft,
};

/// Looks up a single-byte key. Unknown bytes are [Command::Noop].
pub fn lookup_key(byte: u8) -> Command {
    KEYMAP.get(&byte).copied().unwrap_or(Command::Noop)
}

/// Looks up the final byte of an arrow sequence. Unknown bytes are [Command::Noop].
pub fn lookup_arrow(byte: u8) -> Command {
    ARROW_KEYS.get(&byte).copied().unwrap_or(Command::Noop)
}

/// Whether a command acts on the session state. Resize only redraws.
pub fn is_state_changing(command: Command) -> bool {
    !matches!(command, Command::Noop | Command::Resize)
}
