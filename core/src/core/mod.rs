pub mod bus;
pub mod channel;
pub mod host;
pub mod intc;

pub use bus::{Bus, BusError};
pub use channel::{IoChannel, SharedChannel};
pub use host::Host;
pub use intc::InterruptController;
