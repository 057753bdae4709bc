use crate::core::host::Host;
use crate::device::{AddressSpan, Device};

/// Display status register address. DSR[15] = output ready, which this
/// simulator holds permanently set — the channel never back-pressures.
pub const DSR: u16 = 0xFE04;
/// Display data register address; writing DDR[7:0] emits one character.
pub const DDR: u16 = 0xFE06;

const READY: u16 = 0x8000;

/// Memory-mapped character display.
pub struct Display {
    host: Option<Host>,
    dsr: u16,
    ddr: u16,
}

impl Display {
    pub fn new() -> Self {
        Self {
            host: None,
            dsr: READY,
            ddr: 0,
        }
    }
}

impl Device for Display {
    fn start(&mut self, host: Host) {
        self.host = Some(host);
    }

    fn read_register(&mut self, address: u16) -> u16 {
        match address {
            DSR => self.dsr,
            DDR => self.ddr,
            _ => 0,
        }
    }

    fn write_register(&mut self, address: u16, value: u16) {
        match address {
            // The ready bit is the device's to keep.
            DSR => self.dsr = (value & !READY) | (self.dsr & READY),
            DDR => {
                self.ddr = value;
                if let Some(host) = &self.host {
                    host.write_output(value as u8);
                }
            }
            _ => {}
        }
    }

    fn addresses(&self) -> AddressSpan {
        AddressSpan::Separate(vec![DSR, DDR])
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
