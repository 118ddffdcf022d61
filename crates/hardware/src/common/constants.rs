//! Global Machine Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Word Geometry:** Word size and alignment helpers.
//! 2. **Memory Map:** Segment base addresses matching the SPIM layout.
//! 3. **Initial State:** Register values established before the first step.
//! 4. **Simulation Constants:** Step budgets and the exception vector.

/// Size of a machine word in bytes.
pub const BYTES_PER_WORD: u32 = 4;

/// Base address of the user text segment.
pub const TEXT_BOT: u32 = 0x0040_0000;

/// Base address of the user data segment.
pub const DATA_BOT: u32 = 0x1000_0000;

/// One past the highest address of the user stack.
///
/// The stack grows downward from here; the word at `STACK_TOP - 4` is the
/// first one pushed.
pub const STACK_TOP: u32 = 0x8000_0000;

/// Base address of the kernel text segment.
pub const K_TEXT_BOT: u32 = 0x8000_0000;

/// Base address of the kernel data segment.
pub const K_DATA_BOT: u32 = 0x9000_0000;

/// Address control transfers to when an exception is raised.
pub const EXCEPTION_VECTOR: u32 = 0x8000_0180;

/// Base address of the memory-mapped console window.
pub const MM_IO_BOT: u32 = 0xffff_0000;

/// One past the last address of the memory-mapped console window.
pub const MM_IO_TOP: u32 = 0xffff_0010;

/// Initial global pointer (`$gp`), pointing into the middle of the small-data area.
pub const GP_INITIAL: u32 = 0x1000_8000;

/// Step budget used when a caller asks for zero steps.
pub const DEFAULT_RUN_STEPS: u32 = 2_147_483_647;

/// Rounds `addr` down to the nearest word boundary.
#[inline]
pub const fn round_down_word(addr: u32) -> u32 {
    addr & !(BYTES_PER_WORD - 1)
}

/// Rounds `value` up to the nearest word boundary, saturating at the top of the address space.
#[inline]
pub const fn round_up_word(value: u32) -> u32 {
    match value.checked_add(BYTES_PER_WORD - 1) {
        Some(v) => round_down_word(v),
        None => round_down_word(u32::MAX),
    }
}
