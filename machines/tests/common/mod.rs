use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use lc3sim_core::core::channel::IoChannel;

/// Scripted I/O endpoint: queued input bytes, captured output bytes.
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
