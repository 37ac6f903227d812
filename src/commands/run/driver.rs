//! Stdin driver for stepped runs
//!
//! Reads one command per line and forwards it to the run's [`StepHandle`].

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use graphstep_core::step::{StepHandle, StepMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Advance,
    Auto,
    Manual,
    Cancel,
}

/// Empty line or `n` steps, `a` and `m` switch mode, `q` cancels
fn parse_key(line: &str) -> Option<Key> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "n" | "next" => Some(Key::Advance),
        "a" | "auto" => Some(Key::Auto),
        "m" | "manual" => Some(Key::Manual),
        "q" | "quit" => Some(Key::Cancel),
        _ => None,
    }
}

/// Feed lines from `reader` to `handle` until cancel or end of input.
///
/// End of input switches to auto so a run never waits on a closed stdin.
fn drive(reader: impl BufRead, handle: &StepHandle) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        match parse_key(&line) {
            Some(Key::Advance) => handle.advance(),
            Some(Key::Auto) => handle.set_mode(StepMode::Auto),
            Some(Key::Manual) => handle.set_mode(StepMode::Manual),
            Some(Key::Cancel) => {
                handle.cancel();
                return;
            }
            None => tracing::debug!(input = %line.trim(), "ignoring unknown key"),
        }
    }
    tracing::debug!("stdin closed, switching to auto");
    handle.set_mode(StepMode::Auto);
}

/// Spawn the driver on a detached thread reading the process stdin
pub(super) fn spawn(handle: StepHandle) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-driver".to_string())
        .spawn(move || drive(io::stdin().lock(), &handle))
}
