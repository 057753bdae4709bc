//! Raw-mode terminal I/O channel.
//!
//! While a program free-runs, the tty is switched to raw mode (no echo, no
//! line buffering) and keystrokes are drained through termion's async
//! stdin reader, so the simulator loop can poll for input without
//! stalling. Both are torn down when the run ends; the debugger prompt
//! always sees a cooked, blocking terminal.

use std::io::{self, Read, Stdout, Write};

use termion::AsyncReader;
use termion::raw::{IntoRawMode, RawTerminal};

use lc3sim_core::core::channel::IoChannel;

pub struct StdioChannel {
    /// Held while raw mode is active; dropping it restores the tty.
    raw: Option<RawTerminal<Stdout>>,
    /// Non-blocking stdin reader, live only while a program runs.
    input: Option<AsyncReader>,
}

impl StdioChannel {
    pub fn new() -> Self {
        Self {
            raw: None,
            input: None,
        }
    }
}

impl Default for StdioChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl IoChannel for StdioChannel {
    fn get_char(&mut self) -> Option<u8> {
        // Not started: leave stdin alone for the debugger prompt.
        let input = self.input.as_mut()?;
        let mut buf = [0u8; 1];
        match input.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }

    fn put_char(&mut self, c: u8) -> io::Result<()> {
        match &mut self.raw {
            Some(raw) => {
                raw.write_all(&[c])?;
                raw.flush()
            }
            None => {
                let mut stdout = io::stdout();
                stdout.write_all(&[c])?;
                stdout.flush()
            }
        }
    }

    fn start(&mut self) -> io::Result<()> {
        if self.raw.is_some() {
            return Ok(());
        }
        let raw = io::stdout().into_raw_mode()?;
        log::debug!("terminal: raw mode on, async stdin reader up");
        self.input = Some(termion::async_stdin());
        self.raw = Some(raw);
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        self.input = None;
        if self.raw.take().is_some() {
            log::debug!("terminal: restored cooked mode");
        }
        Ok(())
    }
}
