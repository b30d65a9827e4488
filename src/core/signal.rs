//! Terminal resize notification.
//!
//! The SIGWINCH handler only raises [RESIZE_PENDING]. The main loop consumes it
//! with [take_resize] after every read and redraws from there.

use crate::error::SessionError;

use nix::libc;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the signal handler, cleared by [take_resize].
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn on_resize(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::SeqCst);
}

/// Installs the SIGWINCH handler.
///
/// `SA_RESTART` is left off so a resize interrupts the blocking input read.
pub fn install_resize_handler() -> Result<(), SessionError> {
    let action = SigAction::new(
        SigHandler::Handler(on_resize),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
    unsafe { sigaction(Signal::SIGWINCH, &action) }.map_err(SessionError::SignalInstall)?;
    Ok(())
}

/// Returns whether a resize arrived since the last call, and clears the flag.
pub fn take_resize() -> bool {
    RESIZE_PENDING.swap(false, Ordering::SeqCst)
}

/// Serializes tests that raise SIGWINCH, since the flag is process-wide.
#[cfg(test)]
pub(crate) static SIGNAL_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::raise;

    #[test]
    fn resize_signal_sets_flag_once() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = SIGNAL_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        install_resize_handler()?;
        take_resize();

        raise(Signal::SIGWINCH)?;
        assert!(take_resize());
        assert!(!take_resize());
        Ok(())
    }
}
