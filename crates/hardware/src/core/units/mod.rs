//! Functional units.
//!
//! The simulator executes one instruction per step, so the only unit with
//! state-independent logic worth separating is the integer ALU.

/// Integer arithmetic logic unit.
pub mod alu;
