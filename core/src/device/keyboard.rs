use crate::core::host::Host;
use crate::device::{AddressSpan, Device, Hooks};

/// Keyboard status register address. KBSR[15] = input ready, KBSR[14] =
/// interrupt enable.
pub const KBSR: u16 = 0xFE00;
/// Keyboard data register address. KBDR[7:0] = last received character.
pub const KBDR: u16 = 0xFE02;

/// Interrupt vector asserted when input arrives with interrupts enabled.
pub const KEYBOARD_INTERRUPT_VECTOR: u8 = 0x80;
/// LC-3 keyboard interrupt priority level.
pub const KEYBOARD_INTERRUPT_PRIORITY: u8 = 4;

const READY: u16 = 0x8000;
const INTERRUPT_ENABLE: u16 = 0x4000;

/// Memory-mapped keyboard.
///
/// Register semantics:
/// - Reading KBDR returns the stored character and clears the ready bit.
/// - Writing KBSR updates everything except the ready bit, which only the
///   device itself controls (set on input, cleared on KBDR read).
/// - Writing KBDR is ignored.
///
/// When input arrives while KBSR[14] is set, the device asserts interrupt
/// vector 0x80 at priority 4 through the host.
pub struct Keyboard {
    host: Option<Host>,
    kbsr: u16,
    kbdr: u16,
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            host: None,
            kbsr: 0,
            kbdr: 0,
        }
    }
}

impl Device for Keyboard {
    fn start(&mut self, host: Host) {
        self.host = Some(host);
    }

    fn read_register(&mut self, address: u16) -> u16 {
        match address {
            KBSR => self.kbsr,
            KBDR => {
                self.kbsr &= !READY;
                self.kbdr
            }
            _ => 0,
        }
    }

    fn write_register(&mut self, address: u16, value: u16) {
        if address == KBSR {
            self.kbsr = (value & !READY) | (self.kbsr & READY);
        }
    }

    fn addresses(&self) -> AddressSpan {
        AddressSpan::Separate(vec![KBSR, KBDR])
    }

    fn hooks(&self) -> Hooks {
        Hooks {
            on_input: true,
            on_tick: false,
        }
    }

    fn on_input(&mut self, input: u8) {
        self.kbdr = u16::from(input);
        self.kbsr |= READY;
        if self.kbsr & INTERRUPT_ENABLE != 0 {
            if let Some(host) = &self.host {
                host.alert_interrupt(KEYBOARD_INTERRUPT_VECTOR, KEYBOARD_INTERRUPT_PRIORITY);
            }
        }
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
