//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions and the decoded `Instruction` representation
//! for MIPS32 R-, I- and J-format encodings.

/// Bit mask for a 5-bit register or shift-amount field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the 6-bit opcode and function fields.
pub const OPCODE_MASK: u32 = 0x3F;
/// Bit mask for the 16-bit immediate field.
pub const IMM_MASK: u32 = 0xFFFF;
/// Bit mask for the 26-bit jump target field.
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Primary opcode (bits 26-31).
    fn opcode(&self) -> u32;
    /// First source register (bits 21-25).
    fn rs(&self) -> usize;
    /// Second source or destination register for I-format (bits 16-20).
    fn rt(&self) -> usize;
    /// Destination register for R-format (bits 11-15).
    fn rd(&self) -> usize;
    /// Shift amount (bits 6-10).
    fn shamt(&self) -> u32;
    /// Function field selecting the R-format operation (bits 0-5).
    fn funct(&self) -> u32;
    /// Raw 16-bit immediate (bits 0-15).
    fn imm(&self) -> u16;
    /// Sign-extended immediate.
    fn simm(&self) -> i32;
    /// 26-bit jump target index (bits 0-25).
    fn target(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> 26) & OPCODE_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> 21) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> 16) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 11) & REG_MASK) as usize
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> 6) & REG_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn imm(&self) -> u16 {
        (self & IMM_MASK) as u16
    }

    #[inline(always)]
    fn simm(&self) -> i32 {
        i32::from((self & IMM_MASK) as u16 as i16)
    }

    #[inline(always)]
    fn target(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Three-register ALU operations (`rd = rs op rt`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Signed add; traps on overflow.
    Add,
    /// Wrapping add.
    Addu,
    /// Signed subtract; traps on overflow.
    Sub,
    /// Wrapping subtract.
    Subu,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOR.
    Nor,
    /// Signed set-on-less-than.
    Slt,
    /// Unsigned set-on-less-than.
    Sltu,
}

/// Shift operations, by immediate amount or by register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    /// Logical left.
    Sll,
    /// Logical right.
    Srl,
    /// Arithmetic right.
    Sra,
}

/// Register-immediate ALU operations (`rt = rs op imm`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmOp {
    /// Signed add; traps on overflow.
    Addi,
    /// Wrapping add of the sign-extended immediate.
    Addiu,
    /// Signed compare against the sign-extended immediate.
    Slti,
    /// Unsigned compare against the sign-extended immediate.
    Sltiu,
    /// AND with the zero-extended immediate.
    Andi,
    /// OR with the zero-extended immediate.
    Ori,
    /// XOR with the zero-extended immediate.
    Xori,
}

/// Multiply and divide operations writing HI/LO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulDivOp {
    /// Signed 64-bit product.
    Mult,
    /// Unsigned 64-bit product.
    Multu,
    /// Signed quotient and remainder.
    Div,
    /// Unsigned quotient and remainder.
    Divu,
}

/// Branch conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    /// `rs == rt`.
    Eq,
    /// `rs != rt`.
    Ne,
    /// `rs <= 0`.
    Lez,
    /// `rs > 0`.
    Gtz,
    /// `rs < 0`.
    Ltz,
    /// `rs >= 0`.
    Gez,
    /// `rs < 0`, linking `$ra`.
    Ltzal,
    /// `rs >= 0`, linking `$ra`.
    Gezal,
}

/// Width of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    /// 8 bits.
    Byte,
    /// 16 bits.
    Half,
    /// 32 bits.
    Word,
}

impl Width {
    /// Access size in bytes; also the required alignment.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// A decoded MIPS32 integer instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `op rd, rs, rt`.
    Alu {
        /// Operation.
        op: AluOp,
        /// Destination.
        rd: usize,
        /// First source.
        rs: usize,
        /// Second source.
        rt: usize,
    },
    /// `op rd, rt, shamt`.
    Shift {
        /// Operation.
        op: ShiftOp,
        /// Destination.
        rd: usize,
        /// Shifted value.
        rt: usize,
        /// Shift amount.
        shamt: u32,
    },
    /// `opv rd, rt, rs`.
    ShiftVar {
        /// Operation.
        op: ShiftOp,
        /// Destination.
        rd: usize,
        /// Shifted value.
        rt: usize,
        /// Register holding the shift amount.
        rs: usize,
    },
    /// `op rt, rs, imm`.
    AluImm {
        /// Operation.
        op: ImmOp,
        /// Destination.
        rt: usize,
        /// Source.
        rs: usize,
        /// Raw immediate; extension depends on `op`.
        imm: u16,
    },
    /// `lui rt, imm`.
    Lui {
        /// Destination.
        rt: usize,
        /// Upper half of the result.
        imm: u16,
    },
    /// `op rs, rt` into HI/LO.
    MulDiv {
        /// Operation.
        op: MulDivOp,
        /// First operand.
        rs: usize,
        /// Second operand.
        rt: usize,
    },
    /// `mul rd, rs, rt` (low word into a GPR).
    Mul {
        /// Destination.
        rd: usize,
        /// First operand.
        rs: usize,
        /// Second operand.
        rt: usize,
    },
    /// `mfhi rd` / `mflo rd`.
    MoveFrom {
        /// True for HI, false for LO.
        hi: bool,
        /// Destination.
        rd: usize,
    },
    /// `mthi rs` / `mtlo rs`.
    MoveTo {
        /// True for HI, false for LO.
        hi: bool,
        /// Source.
        rs: usize,
    },
    /// Conditional PC-relative branch.
    Branch {
        /// Condition.
        cond: BranchCond,
        /// First operand.
        rs: usize,
        /// Second operand (only for `Eq`/`Ne`).
        rt: usize,
        /// Signed word offset from the delay slot.
        offset: i16,
    },
    /// `j target` / `jal target`.
    Jump {
        /// Whether `$ra` receives the return address.
        link: bool,
        /// 26-bit word index within the current 256 MiB region.
        target: u32,
    },
    /// `jr rs` / `jalr rd, rs`.
    JumpReg {
        /// Register receiving the return address, if linking.
        link: Option<usize>,
        /// Register holding the target.
        rs: usize,
    },
    /// `lX rt, offset(base)`.
    Load {
        /// Access width.
        width: Width,
        /// Whether the loaded value is sign-extended.
        signed: bool,
        /// Destination.
        rt: usize,
        /// Base register.
        base: usize,
        /// Signed byte offset.
        offset: i16,
    },
    /// `sX rt, offset(base)`.
    Store {
        /// Access width.
        width: Width,
        /// Source.
        rt: usize,
        /// Base register.
        base: usize,
        /// Signed byte offset.
        offset: i16,
    },
    /// `mfc0 rt, rd`.
    Mfc0 {
        /// Destination GPR.
        rt: usize,
        /// Source CP0 register.
        rd: usize,
    },
    /// `mtc0 rt, rd`.
    Mtc0 {
        /// Source GPR.
        rt: usize,
        /// Destination CP0 register.
        rd: usize,
    },
    /// Return from exception.
    Eret,
    /// System call.
    Syscall,
    /// Breakpoint trap with its 20-bit code.
    Break {
        /// Code field, ignored by the hardware.
        code: u32,
    },
}

impl Instruction {
    /// Returns true for instructions that transfer control after a delay slot.
    pub const fn is_control_transfer(&self) -> bool {
        matches!(self, Self::Branch { .. } | Self::Jump { .. } | Self::JumpReg { .. })
    }
}
