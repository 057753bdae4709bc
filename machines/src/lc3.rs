use std::io;
use std::sync::{Arc, PoisonError};

use lc3sim_core::core::bus::{Bus, BusError};
use lc3sim_core::core::channel::{IoChannel, SharedChannel};
use lc3sim_core::core::host::Host;
use lc3sim_core::core::intc::InterruptController;
use lc3sim_core::cpu::{Cpu, MCR_ADDR, MCR_CLOCK_ENABLE, Reg, TickResult};
use lc3sim_core::device::SharedDevice;

use crate::loader::LoadError;

/// What a debugger-safe memory read found at an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressRead {
    /// An ordinary RAM cell and its contents.
    Value(u16),
    /// The address belongs to a device; reading it would have side effects.
    DeviceRegister,
}

/// The assembled LC-3 machine.
///
/// Owns the bus, the interrupt controller, the CPU, the attached devices
/// and the I/O channel, and drives the per-tick sequence: CPU advance,
/// input fan-out, on-tick fan-out, then the guarded interrupt check. Also
/// carries the debugger-facing read/write/step/run surface.
pub struct Lc3System {
    bus: Bus,
    cpu: Cpu,
    intc: Arc<InterruptController>,
    channel: SharedChannel,
    host: Host,
    on_input_devices: Vec<SharedDevice>,
    on_tick_devices: Vec<SharedDevice>,
}

impl Lc3System {
    /// Build a machine around an I/O channel. The MCR comes up with the
    /// clock enable bit set.
    pub fn new(channel: SharedChannel) -> Self {
        let mut bus = Bus::new();
        bus.write(MCR_ADDR, MCR_CLOCK_ENABLE);
        let intc = Arc::new(InterruptController::new());
        let host = Host::new(intc.clone(), channel.clone());
        Self {
            bus,
            cpu: Cpu::new(),
            intc,
            channel,
            host,
            on_input_devices: Vec::new(),
            on_tick_devices: Vec::new(),
        }
    }

    /// Map a device onto the bus, hand it the host, and subscribe the
    /// hooks it declares. On `AddressConflict` the device is not attached.
    pub fn attach(&mut self, device: SharedDevice) -> Result<(), BusError> {
        self.bus.attach(device.clone())?;
        device.borrow_mut().start(self.host.clone());
        let hooks = device.borrow().hooks();
        if hooks.on_input {
            self.on_input_devices.push(device.clone());
        }
        if hooks.on_tick {
            self.on_tick_devices.push(device);
        }
        Ok(())
    }

    /// Load a program image: the first word is the load address, the rest
    /// is written to consecutive addresses through the bus. PC is left at
    /// the load address.
    pub fn load_program(&mut self, image: &[u16]) -> Result<u16, LoadError> {
        let (&origin, words) = image.split_first().ok_or(LoadError::Empty)?;
        let mut address = origin;
        for &word in words {
            self.bus.write(address, word);
            match address.checked_add(1) {
                Some(next) => address = next,
                None => break,
            }
        }
        self.cpu.pc = origin;
        log::info!("loaded {} words at {origin:#06x}", words.len());
        Ok(origin)
    }

    /// Debugger-safe inspection: never dispatches to a device.
    pub fn read_address(&self, address: u16) -> AddressRead {
        if self.bus.is_device(address) {
            AddressRead::DeviceRegister
        } else {
            AddressRead::Value(self.bus.read_memory(address))
        }
    }

    /// Unconditional bus write; device registers receive it like any other
    /// bus master's store.
    pub fn write_address(&mut self, address: u16, value: u16) {
        self.bus.write(address, value);
    }

    pub fn read_register(&self, reg: Reg) -> u16 {
        self.cpu.read_register(reg)
    }

    pub fn write_register(&mut self, reg: Reg, value: u16) {
        self.cpu.write_register(reg, value);
    }

    /// One full machine tick. Interrupts raised during this tick are not
    /// considered until its own post-execute check.
    pub fn tick(&mut self) -> TickResult {
        if self.cpu.tick(&mut self.bus) == TickResult::Halted {
            return TickResult::Halted;
        }
        let input = self.lock_channel().get_char();
        if let Some(input) = input {
            for device in &self.on_input_devices {
                device.borrow_mut().on_input(input);
            }
        }
        for device in &self.on_tick_devices {
            device.borrow_mut().on_tick();
        }
        let accepted = self
            .intc
            .check(self.cpu.priority(), |current, pending| pending > current);
        if let Some((vector, priority)) = accepted {
            self.cpu.accept_interrupt(vector, priority, &mut self.bus);
        }
        TickResult::Running
    }

    /// Tick at most `n` times, stopping early once halted.
    pub fn step(&mut self, n: u64) -> TickResult {
        for _ in 0..n {
            if self.tick() == TickResult::Halted {
                return TickResult::Halted;
            }
        }
        TickResult::Running
    }

    /// Free-run until the MCR clock bit is cleared, bracketed by the I/O
    /// channel's start/end hooks.
    pub fn run_until_end(&mut self) -> io::Result<()> {
        self.lock_channel().start()?;
        while self.tick() == TickResult::Running {}
        self.lock_channel().end()
    }

    fn lock_channel(&self) -> std::sync::MutexGuard<'_, dyn IoChannel + Send + 'static> {
        self.channel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
