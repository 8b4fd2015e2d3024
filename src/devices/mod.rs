//! Append devices and the destinations they write to

pub mod destination;
pub mod lockless;
pub mod sink;

pub use destination::Destination;
pub use lockless::{program_name, LocklessLogDevice};
pub use sink::Sink;

pub use crate::core::LogDevice;
