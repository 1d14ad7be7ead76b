//! Warning, notice and prompt messages for CLI output.

use std::io::Write;

use super::quiet;
use crate::terminal::{RED, RESET, YELLOW};

fn paint(colour: &str, msg: &str) -> String {
    if quiet::stderr_is_tty() {
        format!("{colour}{msg}{RESET}")
    } else {
        msg.to_string()
    }
}

/// Yellow warning on stderr, suppressed in quiet mode.
pub fn warn(msg: &str) {
    if !quiet::enabled() {
        eprintln!("{}", paint(YELLOW, msg));
    }
}

/// Red error on stderr. Always shown.
pub fn error(msg: &str) {
    eprintln!("{}", paint(RED, msg));
}

pub fn settings_unreadable(err: &dyn std::fmt::Display) {
    warn(&format!("Failed to load settings, using defaults: {err}"));
}

pub fn default_saved(preset: &str) {
    if !quiet::enabled() {
        eprintln!("Default preset set to {preset}");
    }
}

pub fn clipboard_copied(count: usize) {
    if !quiet::enabled() {
        if count == 1 {
            println!("*** -COPIED TO CLIPBOARD- ***");
        } else {
            println!("*** -{count} PASSWORDS COPIED TO CLIPBOARD- ***");
        }
    }
}

pub fn clipboard_error(err: &str) {
    error(&format!("Clipboard error: {err}"));
}

/// Ask whether to print instead when the clipboard is unavailable.
/// Quiet or non-interactive runs fall back to printing without asking.
pub fn clipboard_fallback_prompt() -> bool {
    if quiet::skip_prompt() {
        return true;
    }

    eprint!("Clipboard unavailable. Print to terminal instead? [Y/n]: ");
    let _ = std::io::stderr().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return true;
    }
    let input = input.trim().to_lowercase();
    if input.is_empty() || input == "y" || input == "yes" {
        eprintln!();
        return true;
    }

    eprintln!("\nAborted.");
    false
}
