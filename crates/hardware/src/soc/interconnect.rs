//! System interconnect for memory and console access.
//!
//! This module implements the bus the CPU issues loads and stores through. It provides:
//! 1. **Access routing:** Addresses in the mapped console window go to the console
//!    registers (when enabled); everything else goes to segmented memory.
//! 2. **Console ownership:** The `Console` used by syscalls and mapped I/O alike.
//! 3. **Image loading:** Placement of program segments through memory.

use crate::common::{SimError, Trap};
use crate::config::Config;
use crate::soc::devices::{Console, MappedConsole};
use crate::soc::memory::Memory;

/// Memory plus console: everything outside the CPU.
#[derive(Debug)]
pub struct System {
    /// Segmented address space.
    pub memory: Memory,
    /// Character stream used by syscalls and the mapped registers.
    pub console: Console,
    mapped_io: Option<MappedConsole>,
}

impl System {
    /// Builds the system from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Segment sizes and whether the console registers are mapped.
    /// * `console` - The console the program will talk to.
    pub fn new(config: &Config, console: Console) -> Self {
        Self {
            memory: Memory::new(&config.memory),
            console,
            mapped_io: config.system.mapped_io.then(MappedConsole::default),
        }
    }

    /// Loads a word through the bus.
    pub fn load_word(&mut self, addr: u32) -> Result<u32, Trap> {
        if let Some(dev) = self.mapped_io.filter(|_| MappedConsole::contains(addr)) {
            if addr % 4 != 0 {
                return Err(Trap::AddressErrorLoad(addr));
            }
            return Ok(dev.read(addr, &mut self.console));
        }
        self.memory.read_word(addr)
    }

    /// Loads a halfword through the bus.
    pub fn load_half(&mut self, addr: u32) -> Result<u16, Trap> {
        if let Some(dev) = self.mapped_io.filter(|_| MappedConsole::contains(addr)) {
            return Ok(dev.read(addr, &mut self.console) as u16);
        }
        self.memory.read_half(addr)
    }

    /// Loads a byte through the bus.
    pub fn load_byte(&mut self, addr: u32) -> Result<u8, Trap> {
        if let Some(dev) = self.mapped_io.filter(|_| MappedConsole::contains(addr)) {
            return Ok(dev.read(addr, &mut self.console) as u8);
        }
        self.memory.read_byte(addr)
    }

    /// Stores a word through the bus.
    pub fn store_word(&mut self, addr: u32, val: u32) -> Result<(), Trap> {
        self.store(addr, val, |mem| mem.write_word(addr, val))
    }

    /// Stores a halfword through the bus.
    pub fn store_half(&mut self, addr: u32, val: u16) -> Result<(), Trap> {
        self.store(addr, u32::from(val), |mem| mem.write_half(addr, val))
    }

    /// Stores a byte through the bus.
    pub fn store_byte(&mut self, addr: u32, val: u8) -> Result<(), Trap> {
        self.store(addr, u32::from(val), |mem| mem.write_byte(addr, val))
    }

    fn store(
        &mut self,
        addr: u32,
        val: u32,
        to_memory: impl FnOnce(&mut Memory) -> Result<(), Trap>,
    ) -> Result<(), Trap> {
        if let Some(dev) = self.mapped_io.as_mut().filter(|_| MappedConsole::contains(addr)) {
            dev.write(addr, val, &mut self.console);
            return Ok(());
        }
        to_memory(&mut self.memory)
    }

    /// Reads a NUL-terminated string starting at `addr`.
    ///
    /// Stops at the first unmapped byte. The terminator is not included.
    pub fn read_c_string(&self, addr: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut cursor = addr;
        while let Ok(byte) = self.memory.read_byte(cursor) {
            if byte == 0 {
                break;
            }
            bytes.push(byte);
            cursor = match cursor.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }
        bytes
    }

    /// Copies a loaded segment into memory, followed by `zero_fill` zero bytes.
    pub fn load_segment(
        &mut self,
        addr: u32,
        bytes: &[u8],
        zero_fill: u32,
    ) -> Result<(), SimError> {
        self.memory.load_bytes(addr, bytes, zero_fill)
    }
}
