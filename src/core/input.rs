//! Raw input decoding for dirview.
//!
//! [decode] reads one key from a [ByteSource] and turns it into a [Command].
//! It never fails: unknown bytes and broken escape sequences are [Command::Noop],
//! a closed input is [Command::Quit].

use crate::app::keymap::{CSI, Command, ESC, lookup_arrow, lookup_key};
use crate::error::SessionError;

use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use tracing::{trace, warn};

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::AsFd;
use std::time::Duration;

/// Something that yields single input bytes.
///
/// `Ok(None)` means no byte is available: end of input for [ByteSource::read_byte],
/// end of input or timeout for [ByteSource::read_follow_up].
pub trait ByteSource {
    /// Blocks for the next byte.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Reads a byte that is expected to follow an escape.
    /// Sources that can wait override this with a bounded wait.
    fn read_follow_up(&mut self) -> io::Result<Option<u8>> {
        self.read_byte()
    }
}

impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.split_first() {
            Some((&first, rest)) => {
                *self = rest;
                Ok(Some(first))
            }
            None => Ok(None),
        }
    }
}

/// Unbuffered reader on the terminal's standard input.
///
/// Reads go straight to the file descriptor one byte at a time, so a resize
/// signal interrupts the blocking read and surfaces as [io::ErrorKind::Interrupted].
#[derive(Debug)]
pub struct TtyInput {
    file: File,
    escape_timeout: Duration,
}

impl TtyInput {
    /// Duplicates the stdin descriptor into an owned, unbuffered reader.
    pub fn stdin(escape_timeout: Duration) -> Result<Self, SessionError> {
        let fd = io::stdin()
            .as_fd()
            .try_clone_to_owned()
            .map_err(SessionError::Input)?;
        Ok(Self {
            file: File::from(fd),
            escape_timeout,
        })
    }

    fn poll_timeout(&self) -> PollTimeout {
        let millis = self.escape_timeout.as_millis().min(u16::MAX as u128) as u16;
        PollTimeout::from(millis)
    }
}

impl ByteSource for TtyInput {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.file.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    fn read_follow_up(&mut self) -> io::Result<Option<u8>> {
        let ready = {
            let mut fds = [PollFd::new(self.file.as_fd(), PollFlags::POLLIN)];
            poll(&mut fds, self.poll_timeout()).map_err(io::Error::from)?
        };
        if ready == 0 {
            return Ok(None);
        }
        self.read_byte()
    }
}

/// Reads one key from `source` and classifies it.
///
/// - End of input, or a hard read error on the first byte, is [Command::Quit].
/// - An interrupted read is [Command::Noop]; the caller then checks the resize flag.
/// - `ESC [ A..D` are the arrow keys. Any other escape sequence, or one whose
///   follow-up bytes do not arrive, is [Command::Noop].
pub fn decode<S: ByteSource + ?Sized>(source: &mut S) -> Command {
    let byte = match source.read_byte() {
        Ok(Some(byte)) => byte,
        Ok(None) => return Command::Quit,
        Err(e) if e.kind() == io::ErrorKind::Interrupted => return Command::Noop,
        Err(e) => {
            warn!(error = %e, "input read failed");
            return Command::Quit;
        }
    };

    if byte != ESC {
        let command = lookup_key(byte);
        trace!(byte, ?command, "key decoded");
        return command;
    }

    let Some(second) = follow_up(source) else {
        return Command::Noop;
    };
    let Some(third) = follow_up(source) else {
        return Command::Noop;
    };
    if second != CSI {
        return Command::Noop;
    }
    lookup_arrow(third)
}

fn follow_up<S: ByteSource + ?Sized>(source: &mut S) -> Option<u8> {
    match source.read_follow_up() {
        Ok(byte) => byte,
        Err(e) => {
            trace!(error = %e, "escape follow-up unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted read results.
    struct Script(VecDeque<io::Result<Option<u8>>>);

    impl ByteSource for Script {
        fn read_byte(&mut self) -> io::Result<Option<u8>> {
            self.0.pop_front().unwrap_or(Ok(None))
        }
    }

    fn decode_all(mut bytes: &[u8]) -> Vec<Command> {
        let mut out = Vec::new();
        while !bytes.is_empty() {
            out.push(decode(&mut bytes));
        }
        out
    }

    #[test]
    fn arrow_sequences() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            [
                Command::CursorUp,
                Command::CursorDown,
                Command::ColumnRight,
                Command::ColumnLeft
            ]
        );
    }

    #[test]
    fn single_byte_keys() {
        assert_eq!(
            decode_all(b"<>[]^\nq"),
            [
                Command::PathScrollLeft,
                Command::PathScrollRight,
                Command::SelectPrevColumn,
                Command::SelectNextColumn,
                Command::ParentDirectory,
                Command::EnterDirectory,
                Command::Quit
            ]
        );
    }

    #[test]
    fn unknown_escape_sequences_consume_two_bytes() {
        let mut bytes: &[u8] = b"\x1bOAq";
        assert_eq!(decode(&mut bytes), Command::Noop);
        assert_eq!(decode(&mut bytes), Command::Quit);

        let mut bytes: &[u8] = b"\x1b[Zq";
        assert_eq!(decode(&mut bytes), Command::Noop);
        assert_eq!(decode(&mut bytes), Command::Quit);
    }

    #[test]
    fn bare_escape_is_noop() {
        let mut bytes: &[u8] = b"\x1b";
        assert_eq!(decode(&mut bytes), Command::Noop);
        let mut bytes: &[u8] = b"\x1b[";
        assert_eq!(decode(&mut bytes), Command::Noop);
    }

    #[test]
    fn end_of_input_quits() {
        let mut bytes: &[u8] = b"";
        assert_eq!(decode(&mut bytes), Command::Quit);
    }

    #[test]
    fn interrupted_read_is_noop() {
        let mut script = Script(VecDeque::from([
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            Ok(Some(b'q')),
        ]));
        assert_eq!(decode(&mut script), Command::Noop);
        assert_eq!(decode(&mut script), Command::Quit);
    }

    #[test]
    fn hard_read_error_quits() {
        let mut script = Script(VecDeque::from([Err(io::Error::other("gone"))]));
        assert_eq!(decode(&mut script), Command::Quit);
    }

    #[test]
    fn failed_follow_up_is_noop() {
        let mut script = Script(VecDeque::from([
            Ok(Some(ESC)),
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            Ok(Some(b'j')),
        ]));
        assert_eq!(decode(&mut script), Command::Noop);
    }

    #[test]
    fn other_bytes_are_noop() {
        assert_eq!(decode_all(b"xyz 1"), [Command::Noop; 5]);
    }
}
