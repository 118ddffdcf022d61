//! MIPS32 opcode and function-field constants.
//!
//! Primary opcodes occupy bits 26-31; `SPECIAL` instructions are further
//! selected by the `funct` field (bits 0-5), `REGIMM` instructions by the
//! `rt` field and `COP0` instructions by the `rs` field.

/// R-type ALU, shift, jump-register and trap instructions.
pub const OP_SPECIAL: u32 = 0x00;
/// Branches on the sign of `rs`, selected by `rt`.
pub const OP_REGIMM: u32 = 0x01;
/// Jump.
pub const OP_J: u32 = 0x02;
/// Jump and link.
pub const OP_JAL: u32 = 0x03;
/// Branch on equal.
pub const OP_BEQ: u32 = 0x04;
/// Branch on not equal.
pub const OP_BNE: u32 = 0x05;
/// Branch on less than or equal to zero.
pub const OP_BLEZ: u32 = 0x06;
/// Branch on greater than zero.
pub const OP_BGTZ: u32 = 0x07;
/// Add immediate (trapping on overflow).
pub const OP_ADDI: u32 = 0x08;
/// Add immediate unsigned (no overflow trap).
pub const OP_ADDIU: u32 = 0x09;
/// Set on less than immediate.
pub const OP_SLTI: u32 = 0x0a;
/// Set on less than immediate unsigned.
pub const OP_SLTIU: u32 = 0x0b;
/// AND immediate.
pub const OP_ANDI: u32 = 0x0c;
/// OR immediate.
pub const OP_ORI: u32 = 0x0d;
/// XOR immediate.
pub const OP_XORI: u32 = 0x0e;
/// Load upper immediate.
pub const OP_LUI: u32 = 0x0f;
/// Coprocessor 0 operations.
pub const OP_COP0: u32 = 0x10;
/// MIPS32 extensions to the R-type space (`mul`).
pub const OP_SPECIAL2: u32 = 0x1c;
/// Load byte.
pub const OP_LB: u32 = 0x20;
/// Load halfword.
pub const OP_LH: u32 = 0x21;
/// Load word.
pub const OP_LW: u32 = 0x23;
/// Load byte unsigned.
pub const OP_LBU: u32 = 0x24;
/// Load halfword unsigned.
pub const OP_LHU: u32 = 0x25;
/// Store byte.
pub const OP_SB: u32 = 0x28;
/// Store halfword.
pub const OP_SH: u32 = 0x29;
/// Store word.
pub const OP_SW: u32 = 0x2b;

/// `funct` values for `OP_SPECIAL`.
pub mod funct {
    /// Shift left logical.
    pub const SLL: u32 = 0x00;
    /// Shift right logical.
    pub const SRL: u32 = 0x02;
    /// Shift right arithmetic.
    pub const SRA: u32 = 0x03;
    /// Shift left logical variable.
    pub const SLLV: u32 = 0x04;
    /// Shift right logical variable.
    pub const SRLV: u32 = 0x06;
    /// Shift right arithmetic variable.
    pub const SRAV: u32 = 0x07;
    /// Jump register.
    pub const JR: u32 = 0x08;
    /// Jump and link register.
    pub const JALR: u32 = 0x09;
    /// System call.
    pub const SYSCALL: u32 = 0x0c;
    /// Breakpoint.
    pub const BREAK: u32 = 0x0d;
    /// Move from HI.
    pub const MFHI: u32 = 0x10;
    /// Move to HI.
    pub const MTHI: u32 = 0x11;
    /// Move from LO.
    pub const MFLO: u32 = 0x12;
    /// Move to LO.
    pub const MTLO: u32 = 0x13;
    /// Signed multiply into HI/LO.
    pub const MULT: u32 = 0x18;
    /// Unsigned multiply into HI/LO.
    pub const MULTU: u32 = 0x19;
    /// Signed divide into HI/LO.
    pub const DIV: u32 = 0x1a;
    /// Unsigned divide into HI/LO.
    pub const DIVU: u32 = 0x1b;
    /// Add (trapping on overflow).
    pub const ADD: u32 = 0x20;
    /// Add unsigned.
    pub const ADDU: u32 = 0x21;
    /// Subtract (trapping on overflow).
    pub const SUB: u32 = 0x22;
    /// Subtract unsigned.
    pub const SUBU: u32 = 0x23;
    /// Bitwise AND.
    pub const AND: u32 = 0x24;
    /// Bitwise OR.
    pub const OR: u32 = 0x25;
    /// Bitwise XOR.
    pub const XOR: u32 = 0x26;
    /// Bitwise NOR.
    pub const NOR: u32 = 0x27;
    /// Set on less than.
    pub const SLT: u32 = 0x2a;
    /// Set on less than unsigned.
    pub const SLTU: u32 = 0x2b;
}

/// `funct` values for `OP_SPECIAL2`.
pub mod funct2 {
    /// Multiply to GPR (low word).
    pub const MUL: u32 = 0x02;
}

/// `rt` values for `OP_REGIMM`.
pub mod regimm {
    /// Branch on less than zero.
    pub const BLTZ: u32 = 0x00;
    /// Branch on greater than or equal to zero.
    pub const BGEZ: u32 = 0x01;
    /// Branch on less than zero and link.
    pub const BLTZAL: u32 = 0x10;
    /// Branch on greater than or equal to zero and link.
    pub const BGEZAL: u32 = 0x11;
}

/// `rs` values for `OP_COP0`.
pub mod cop0 {
    /// Move from coprocessor 0.
    pub const MF: u32 = 0x00;
    /// Move to coprocessor 0.
    pub const MT: u32 = 0x04;
    /// Coprocessor operation; `funct` selects it.
    pub const CO: u32 = 0x10;
    /// `funct` of the exception return operation.
    pub const ERET: u32 = 0x18;
}

/// Canonical encoding of `nop` (`sll $0, $0, 0`).
pub const NOP: u32 = 0x0000_0000;

/// Canonical encoding of `syscall`.
pub const SYSCALL: u32 = funct::SYSCALL;

/// Canonical encoding of `eret`.
pub const ERET: u32 = (OP_COP0 << 26) | (cop0::CO << 21) | cop0::ERET;
