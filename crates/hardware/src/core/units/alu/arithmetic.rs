//! ALU arithmetic operations.
//!
//! Implements 32-bit addition and subtraction, with the trapping (`add`, `sub`)
//! and wrapping (`addu`, `subu`) variants, plus the HI/LO multiply and divide
//! family.

use crate::common::Trap;
use crate::isa::instruction::{AluOp, MulDivOp};

/// Number of bits in a register word (used to split 64-bit products).
const WORD_BITS: u32 = 32;

/// Executes an add or subtract.
///
/// # Returns
///
/// The result, or `Trap::Overflow` when a trapping variant overflows.
/// Non-arithmetic opcodes yield 0.
pub fn execute(op: AluOp, a: u32, b: u32) -> Result<u32, Trap> {
    match op {
        AluOp::Add => (a as i32)
            .checked_add(b as i32)
            .map(|v| v as u32)
            .ok_or(Trap::Overflow),
        AluOp::Addu => Ok(a.wrapping_add(b)),
        AluOp::Sub => (a as i32)
            .checked_sub(b as i32)
            .map(|v| v as u32)
            .ok_or(Trap::Overflow),
        AluOp::Subu => Ok(a.wrapping_sub(b)),
        _ => Ok(0),
    }
}

/// Executes a multiply or divide into `(hi, lo)`.
///
/// Multiplies produce the 64-bit product split across HI (upper) and LO
/// (lower). Divides put the quotient in LO and the remainder in HI, and
/// return `None` for a zero divisor. `i32::MIN / -1` wraps.
pub fn mul_div(op: MulDivOp, a: u32, b: u32) -> Option<(u32, u32)> {
    match op {
        MulDivOp::Mult => {
            let product = i64::from(a as i32) * i64::from(b as i32);
            Some(((product >> WORD_BITS) as u32, product as u32))
        }
        MulDivOp::Multu => {
            let product = u64::from(a) * u64::from(b);
            Some(((product >> WORD_BITS) as u32, product as u32))
        }
        MulDivOp::Div => {
            let (n, d) = (a as i32, b as i32);
            (d != 0).then(|| (n.wrapping_rem(d) as u32, n.wrapping_div(d) as u32))
        }
        MulDivOp::Divu => (b != 0).then(|| (a % b, a / b)),
    }
}
