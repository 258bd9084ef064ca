//! Status messages for the terminal
//!
//! Stdout carries console output only, so it can be piped into other tools.
//! Every status line goes to stderr with a colored mark. Quiet mode keeps
//! errors only.

use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silence success and info messages for the rest of the process
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn print_marked(color: Color, mark: &str, msg: &str) {
    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(color),
        Print(mark),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a success message with a green check mark
pub fn print_success(msg: &str) {
    if is_quiet() {
        return;
    }
    print_marked(Color::Green, "✓ ", msg);
}

/// Print an error message with a red cross
pub fn print_error(msg: &str) {
    print_marked(Color::Red, "✗ ", msg);
}

/// Print an informational message
pub fn print_info(msg: &str) {
    if is_quiet() {
        return;
    }
    print_marked(Color::Cyan, "ℹ ", msg);
}
