//! MIPS32 architecture-specific components.
//!
//! This module contains the implementation of core MIPS32 architectural elements.
//! It includes the following modules:
//! 1. **CP0:** System control coprocessor registers (Status, Cause, EPC, BadVAddr).
//! 2. **GPRs:** General-Purpose Register file implementation.

/// Coprocessor 0 register definitions and access logic.
pub mod cp0;

/// General-Purpose Register file implementation.
pub mod gpr;
