//! ALU shift operations.
//!
//! Implements shift-left logical (SLL), shift-right logical (SRL), and
//! shift-right arithmetic (SRA). Shift amounts are masked to 5 bits (0-31),
//! both for the immediate and the variable (`*v`) forms.

use crate::isa::instruction::ShiftOp;

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op`     - The shift to perform.
/// * `value`  - The value to be shifted.
/// * `amount` - The shift amount; only the low five bits are used.
pub fn execute(op: ShiftOp, value: u32, amount: u32) -> u32 {
    let sh = amount & SHAMT_MASK;
    match op {
        ShiftOp::Sll => value << sh,
        ShiftOp::Srl => value >> sh,
        ShiftOp::Sra => ((value as i32) >> sh) as u32,
    }
}
