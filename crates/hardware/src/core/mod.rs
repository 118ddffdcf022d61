//! Core processor implementation.
//!
//! This module contains the MIPS32 CPU: its architectural registers, the
//! instruction executor, exception entry and the system-call service.

/// Architecture-specific components (CP0 and the general-purpose register file).
pub mod arch;

/// CPU state and single-instruction execution.
pub mod cpu;

/// Execution units (ALU).
pub mod units;

pub use self::cpu::Cpu;
