//! MIPS32 General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for the MIPS32 architecture.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`$0`-`$31`).
//! 2. **Invariant Enforcement:** Ensures that register `$zero` is hardwired to zero.
//! 3. **Inspection:** Copies the whole file out for differential views.

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Register `$zero`
/// is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default)]
pub struct Gpr {
    regs: [u32; 32],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// Register `$zero` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register. Writes to `$zero` are dropped.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of the whole file.
    pub const fn snapshot(&self) -> [u32; 32] {
        self.regs
    }
}
