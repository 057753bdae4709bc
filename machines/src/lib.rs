pub mod lc3;
pub mod loader;

pub use lc3::{AddressRead, Lc3System};
pub use loader::{LoadError, parse_object, read_object_file};
