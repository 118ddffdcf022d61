//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the executor. It handles
//! the MIPS32 arithmetic, logical, shift and multiply/divide operations on
//! 32-bit register words.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: add, sub (trapping and wrapping), mult, div and their unsigned forms
//! - [`logic`]:      and, or, xor, nor, slt, sltu
//! - [`shifts`]:     sll, srl, sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::common::Trap;
use crate::isa::instruction::{AluOp, ImmOp, MulDivOp, ShiftOp};

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes a three-register ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - Value of `rs`
    /// * `b`  - Value of `rt`
    ///
    /// # Returns
    ///
    /// The result word, or `Trap::Overflow` for a signed overflow in `add`/`sub`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spim_core::common::Trap;
    /// use spim_core::core::units::alu::Alu;
    /// use spim_core::isa::instruction::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Addu, 0xFFFF_FFFF, 1), Ok(0));
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1), Err(Trap::Overflow));
    /// assert_eq!(Alu::execute(AluOp::Slt, (-5_i32) as u32, 10), Ok(1));
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> Result<u32, Trap> {
        match op {
            AluOp::Add | AluOp::Addu | AluOp::Sub | AluOp::Subu => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Xor | AluOp::Nor | AluOp::Slt | AluOp::Sltu => {
                Ok(logic::execute(op, a, b))
            }
        }
    }

    /// Executes a register-immediate operation.
    ///
    /// Arithmetic and comparison forms sign-extend `imm`; logical forms zero-extend it.
    pub fn execute_imm(op: ImmOp, a: u32, imm: u16) -> Result<u32, Trap> {
        let sext = i32::from(imm as i16) as u32;
        let zext = u32::from(imm);
        match op {
            ImmOp::Addi => Self::execute(AluOp::Add, a, sext),
            ImmOp::Addiu => Self::execute(AluOp::Addu, a, sext),
            ImmOp::Slti => Self::execute(AluOp::Slt, a, sext),
            ImmOp::Sltiu => Self::execute(AluOp::Sltu, a, sext),
            ImmOp::Andi => Self::execute(AluOp::And, a, zext),
            ImmOp::Ori => Self::execute(AluOp::Or, a, zext),
            ImmOp::Xori => Self::execute(AluOp::Xor, a, zext),
        }
    }

    /// Shifts `value` by the low five bits of `amount`.
    pub fn shift(op: ShiftOp, value: u32, amount: u32) -> u32 {
        shifts::execute(op, value, amount)
    }

    /// Executes a multiply or divide, returning `(hi, lo)`.
    ///
    /// Division by zero leaves HI and LO undefined; `None` is returned and the
    /// caller keeps their previous contents.
    pub fn mul_div(op: MulDivOp, a: u32, b: u32) -> Option<(u32, u32)> {
        arithmetic::mul_div(op, a, b)
    }
}
