//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, which acts as a unified interface for
//! the integer register state of the MIPS32 core. It provides:
//! 1. **Unified Storage:** The 32 general-purpose registers plus the HI/LO multiply results.
//! 2. **Abstraction:** A single set of methods for reading and writing register values.
//! 3. **Observability:** Whole-file snapshots for the register views.

use crate::core::arch::gpr::Gpr;

/// Unified register file containing the general-purpose registers and HI/LO.
///
/// This structure provides a single interface for the integer register state,
/// abstracting the underlying GPR implementation.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    gpr: Gpr,
    /// Upper word of multiply results; remainder of divides.
    pub hi: u32,
    /// Lower word of multiply results; quotient of divides.
    pub lo: u32,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a value from a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `$zero` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        self.gpr.read(idx)
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `$zero` are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        self.gpr.write(idx, val);
    }

    /// Returns a copy of all 32 general-purpose registers in index order.
    pub fn snapshot(&self) -> [u32; 32] {
        self.gpr.snapshot()
    }
}
