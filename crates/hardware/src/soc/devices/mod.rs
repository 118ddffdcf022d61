//! Console Devices.
//!
//! This module contains the console character stream and the memory-mapped
//! register window that exposes it to programs.

/// Console line discipline and byte transports.
pub mod console;

/// SPIM's memory-mapped receiver and transmitter registers.
pub mod mapped_console;

pub use console::{BufferedDevice, Console, ConsoleDevice, StdioDevice};
pub use mapped_console::MappedConsole;
