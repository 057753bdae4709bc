pub mod core;
pub mod cpu;
pub mod device;

pub mod prelude {
    pub use crate::core::{Bus, BusError, Host, InterruptController, IoChannel, SharedChannel};
    pub use crate::cpu::{Cpu, Reg, TickResult};
    pub use crate::device::{AddressSpan, Device, Hooks, SharedDevice};
}
