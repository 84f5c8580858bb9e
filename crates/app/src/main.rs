//! BinTDT operator console.
//!
//! A headless binary: the facility simulation runs inside a minimal Bevy app
//! and is driven over newline-delimited JSON on stdin/stdout. There is no
//! window; any front end (or a human with a terminal) is the client.

mod console_mode;

fn main() {
    console_mode::run_console_mode();
}
