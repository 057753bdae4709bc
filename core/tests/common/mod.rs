use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use lc3sim_core::core::channel::IoChannel;
use lc3sim_core::core::host::Host;
use lc3sim_core::core::intc::InterruptController;

/// Scripted I/O endpoint for testing: queued input bytes, captured output.
pub struct BufferChannel {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl BufferChannel {
    pub fn new() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            input: VecDeque::new(),
            output: Vec::new(),
        }))
    }
}

impl IoChannel for BufferChannel {
    fn get_char(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn put_char(&mut self, c: u8) -> std::io::Result<()> {
        self.output.push(c);
        Ok(())
    }
}

/// A host wired to a fresh controller and buffer channel, with both shared
/// out so tests can inspect them.
pub fn test_host() -> (Host, Arc<InterruptController>, Arc<Mutex<BufferChannel>>) {
    let channel = BufferChannel::new();
    let intc = Arc::new(InterruptController::new());
    let host = Host::new(intc.clone(), channel.clone());
    (host, intc, channel)
}
