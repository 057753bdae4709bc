use std::sync::{Arc, PoisonError};

use crate::core::channel::SharedChannel;
use crate::core::intc::InterruptController;

/// The surface a device sees of the machine hosting it.
///
/// Handed to each device in `start()`. A host is a thin facade over the
/// interrupt controller and the I/O sink; it holds no reference back to
/// the simulator. Clones are `Send`, so a device that owns a background
/// I/O worker can move one into the thread and assert interrupts from
/// there.
#[derive(Clone)]
pub struct Host {
    intc: Arc<InterruptController>,
    output: SharedChannel,
}

impl Host {
    pub fn new(intc: Arc<InterruptController>, output: SharedChannel) -> Self {
        Self { intc, output }
    }

    /// Emit one character through the machine's I/O channel.
    pub fn write_output(&self, c: u8) {
        let result = self
            .output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put_char(c);
        if let Err(err) = result {
            log::warn!("host: dropping output byte {c:#04x}: {err}");
        }
    }

    /// Assert an interrupt with the controller. `priority` is the LC-3
    /// 3-bit urgency (0-7).
    pub fn alert_interrupt(&self, vector: u8, priority: u8) {
        self.intc.alert(vector, priority);
    }
}
