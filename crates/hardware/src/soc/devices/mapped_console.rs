//! Memory-mapped console registers.
//!
//! SPIM exposes the console as four word registers at the top of the address
//! space. Control registers report readiness in bit 0 and hold an
//! interrupt-enable bit in bit 1; interrupts themselves are not delivered.

use crate::common::constants::{MM_IO_BOT, MM_IO_TOP};
use crate::soc::devices::console::Console;

/// Receiver control: bit 0 set when input is available.
pub const RECEIVER_CONTROL: u32 = MM_IO_BOT;
/// Receiver data: reading consumes one input byte.
pub const RECEIVER_DATA: u32 = MM_IO_BOT + 4;
/// Transmitter control: bit 0 is always set (ready).
pub const TRANSMITTER_CONTROL: u32 = MM_IO_BOT + 8;
/// Transmitter data: writing emits the low byte.
pub const TRANSMITTER_DATA: u32 = MM_IO_BOT + 12;

const READY: u32 = 1 << 0;
const INTERRUPT_ENABLE: u32 = 1 << 1;

/// State of the memory-mapped console window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MappedConsole {
    receiver_ie: bool,
    transmitter_ie: bool,
}

impl MappedConsole {
    /// Returns true if `addr` falls in the register window.
    pub const fn contains(addr: u32) -> bool {
        addr >= MM_IO_BOT && addr < MM_IO_TOP
    }

    /// Reads the register containing `addr`.
    pub fn read(&self, addr: u32, console: &mut Console) -> u32 {
        match addr & !3 {
            RECEIVER_CONTROL => {
                let ready = if console.input_available() { READY } else { 0 };
                ready | if self.receiver_ie { INTERRUPT_ENABLE } else { 0 }
            }
            RECEIVER_DATA => u32::from(console.read_char()),
            TRANSMITTER_CONTROL => READY | if self.transmitter_ie { INTERRUPT_ENABLE } else { 0 },
            _ => 0,
        }
    }

    /// Writes the register containing `addr`.
    ///
    /// Only the interrupt-enable bits of the control registers and the
    /// transmitter data register are writable.
    pub fn write(&mut self, addr: u32, val: u32, console: &mut Console) {
        match addr & !3 {
            RECEIVER_CONTROL => self.receiver_ie = val & INTERRUPT_ENABLE != 0,
            TRANSMITTER_CONTROL => self.transmitter_ie = val & INTERRUPT_ENABLE != 0,
            TRANSMITTER_DATA => console.write_char(val as u8),
            _ => {}
        }
    }
}
