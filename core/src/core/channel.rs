use std::io;
use std::sync::{Arc, Mutex};

/// Opaque character source and sink the simulator exchanges bytes through.
///
/// `get_char` must never block: the main loop polls it once per tick.
/// `start`/`end` bracket a `run` and give terminal-backed implementations a
/// place to switch line discipline (raw mode on, cooked mode back).
pub trait IoChannel {
    /// The next input byte, if one is available right now.
    fn get_char(&mut self) -> Option<u8>;

    /// Emit one output byte.
    fn put_char(&mut self, c: u8) -> io::Result<()>;

    /// Called before the simulator starts free-running.
    fn start(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Called after the simulator halts.
    fn end(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Shared handle to a machine's I/O channel. The mutex keeps the
/// [`Host`](crate::core::host::Host) facade `Send`, so device worker
/// threads can hold one.
pub type SharedChannel = Arc<Mutex<dyn IoChannel + Send>>;
