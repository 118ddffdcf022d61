//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout the simulator.
//! These types are used for the following:
//! 1. **Fault Generation:** Determining which address-error trap a failed access raises.
//! 2. **Region Growth:** Only stores may extend the stack downward.

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data loads, and data stores
/// so that failures map onto the correct MIPS exception code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Only the user and kernel text segments may be fetched from.
    Fetch,

    /// Data read access.
    ///
    /// Occurs during load instructions and while syscalls read strings from memory.
    Load,

    /// Data write access.
    ///
    /// Occurs during store instructions and while syscalls copy input into memory.
    Store,
}
