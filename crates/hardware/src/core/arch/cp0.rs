//! Coprocessor 0 (system control) register definitions and operations.
//!
//! This module implements the subset of CP0 that SPIM exposes. It provides:
//! 1. **Register Numbers:** Constants for the CP0 registers addressed by `mfc0`/`mtc0`.
//! 2. **Field Masks:** Bitmasks and shifts for Status and Cause.
//! 3. **Register Storage:** The `Cp0` struct for maintaining architectural state.
//! 4. **Access Logic:** Read and write operations by register number.

/// Bad virtual address register number.
pub const BAD_VADDR: usize = 8;

/// Status register number.
pub const STATUS: usize = 12;

/// Cause register number.
pub const CAUSE: usize = 13;

/// Exception program counter register number.
pub const EPC: usize = 14;

/// Status: exception level. Set on trap entry, cleared by `eret`.
pub const STATUS_EXL: u32 = 1 << 1;

/// Status: user mode bit.
pub const STATUS_UM: u32 = 1 << 4;

/// Status: interrupt mask bits 8..15.
pub const STATUS_IM_MASK: u32 = 0xff << 8;

/// Status value at reset: user mode, all interrupt lines unmasked.
pub const STATUS_DEFAULT: u32 = 0x3000_0000 | STATUS_IM_MASK | STATUS_UM;

/// Shift of the `ExcCode` field within Cause.
pub const CAUSE_EXC_CODE_SHIFT: u32 = 2;

/// Mask of the `ExcCode` field within Cause, after shifting.
pub const CAUSE_EXC_CODE_MASK: u32 = 0x1f;

/// Cause: the faulting instruction sat in a branch delay slot; EPC holds the branch.
pub const CAUSE_BD: u32 = 1 << 31;

/// Coprocessor 0 registers visible to the simulated program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cp0 {
    /// Address that caused the last address error.
    pub bad_vaddr: u32,
    /// Processor status and control.
    pub status: u32,
    /// Cause of the last exception.
    pub cause: u32,
    /// Program counter at which the last exception was raised.
    pub epc: u32,
}

impl Default for Cp0 {
    fn default() -> Self {
        Self {
            bad_vaddr: 0,
            status: STATUS_DEFAULT,
            cause: 0,
            epc: 0,
        }
    }
}

impl Cp0 {
    /// Reads a CP0 register by number.
    ///
    /// Unimplemented registers read as 0.
    pub const fn read(&self, reg: usize) -> u32 {
        match reg {
            BAD_VADDR => self.bad_vaddr,
            STATUS => self.status,
            CAUSE => self.cause,
            EPC => self.epc,
            _ => 0,
        }
    }

    /// Writes a CP0 register by number.
    ///
    /// BadVAddr is read-only; writes to it and to unimplemented registers are ignored.
    pub const fn write(&mut self, reg: usize, val: u32) {
        match reg {
            STATUS => self.status = val,
            CAUSE => self.cause = val,
            EPC => self.epc = val,
            _ => {}
        }
    }

    /// Returns the `ExcCode` field of Cause.
    pub const fn exc_code(&self) -> u32 {
        (self.cause >> CAUSE_EXC_CODE_SHIFT) & CAUSE_EXC_CODE_MASK
    }
}
