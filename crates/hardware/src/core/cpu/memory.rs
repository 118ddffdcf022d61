//! Load and store execution.
//!
//! Widens and narrows register values for byte, halfword and word accesses
//! and routes them through the system bus.

use crate::common::Trap;
use crate::isa::instruction::Width;
use crate::soc::System;

/// Loads a value of `width` from `addr`, sign- or zero-extending it to a word.
pub(crate) fn load(bus: &mut System, width: Width, signed: bool, addr: u32) -> Result<u32, Trap> {
    Ok(match (width, signed) {
        (Width::Byte, true) => i32::from(bus.load_byte(addr)? as i8) as u32,
        (Width::Byte, false) => u32::from(bus.load_byte(addr)?),
        (Width::Half, true) => i32::from(bus.load_half(addr)? as i16) as u32,
        (Width::Half, false) => u32::from(bus.load_half(addr)?),
        (Width::Word, _) => bus.load_word(addr)?,
    })
}

/// Stores the low `width` bytes of `val` at `addr`.
pub(crate) fn store(bus: &mut System, width: Width, addr: u32, val: u32) -> Result<(), Trap> {
    match width {
        Width::Byte => bus.store_byte(addr, val as u8),
        Width::Half => bus.store_half(addr, val as u16),
        Width::Word => bus.store_word(addr, val),
    }
}
