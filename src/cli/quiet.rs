//! Quiet mode and tty detection for CLI output.

use std::sync::atomic::{AtomicBool, Ordering};

/// Suppresses notices, prompts and the statistics box.
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set(quiet: bool) {
    QUIET.store(quiet, Ordering::SeqCst);
}

pub fn enabled() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// stdin is a tty.
pub fn is_interactive() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

/// stderr is a tty, so colour codes are safe to print there.
pub fn stderr_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDERR_FILENO) == 1 }
}

/// True when quiet or when nobody can answer a prompt.
pub fn skip_prompt() -> bool {
    enabled() || !is_interactive()
}
