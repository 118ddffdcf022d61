//! Instruction Disassembler for MIPS32.
//!
//! Converts a 32-bit instruction encoding into the assembly text SPIM shows
//! in its text-segment listing. Registers are printed by number (`$29`), and
//! branch and jump targets are resolved to absolute addresses when the
//! instruction's own address is known.
//!
//! # Usage
//!
//! ```
//! use spim_core::isa::disasm::disassemble;
//! let text = disassemble(0x2402_000a); // addiu $2, $0, 10
//! assert_eq!(text, "addiu $2, $0, 10");
//! ```

use std::fmt::{self, Write};

use crate::isa::decode::decode;
use crate::isa::instruction::{AluOp, BranchCond, ImmOp, Instruction, MulDivOp, ShiftOp, Width};

impl AluOp {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addu => "addu",
            Self::Sub => "sub",
            Self::Subu => "subu",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nor => "nor",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
        }
    }
}

impl ShiftOp {
    /// Assembly mnemonic of the immediate form.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
        }
    }
}

impl ImmOp {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Addi => "addi",
            Self::Addiu => "addiu",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Xori => "xori",
        }
    }

    /// Whether the immediate is sign-extended before use.
    pub const fn sign_extends(self) -> bool {
        matches!(self, Self::Addi | Self::Addiu | Self::Slti | Self::Sltiu)
    }
}

impl MulDivOp {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mult => "mult",
            Self::Multu => "multu",
            Self::Div => "div",
            Self::Divu => "divu",
        }
    }
}

impl BranchCond {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Eq => "beq",
            Self::Ne => "bne",
            Self::Lez => "blez",
            Self::Gtz => "bgtz",
            Self::Ltz => "bltz",
            Self::Gez => "bgez",
            Self::Ltzal => "bltzal",
            Self::Gezal => "bgezal",
        }
    }
}

fn load_mnemonic(width: Width, signed: bool) -> &'static str {
    match (width, signed) {
        (Width::Byte, true) => "lb",
        (Width::Byte, false) => "lbu",
        (Width::Half, true) => "lh",
        (Width::Half, false) => "lhu",
        (Width::Word, _) => "lw",
    }
}

fn store_mnemonic(width: Width) -> &'static str {
    match width {
        Width::Byte => "sb",
        Width::Half => "sh",
        Width::Word => "sw",
    }
}

/// Writes the assembly text of `inst`.
///
/// With `addr` set, branch and jump targets are printed as absolute
/// addresses; otherwise branches show their word offset and jumps their
/// target within the current region.
fn write_instruction<W: Write>(out: &mut W, inst: &Instruction, addr: Option<u32>) -> fmt::Result {
    match *inst {
        Instruction::Shift { op: ShiftOp::Sll, rd: 0, rt: 0, shamt: 0 } => out.write_str("nop"),
        Instruction::Alu { op, rd, rs, rt } => {
            write!(out, "{} ${rd}, ${rs}, ${rt}", op.mnemonic())
        }
        Instruction::Shift { op, rd, rt, shamt } => {
            write!(out, "{} ${rd}, ${rt}, {shamt}", op.mnemonic())
        }
        Instruction::ShiftVar { op, rd, rt, rs } => {
            write!(out, "{}v ${rd}, ${rt}, ${rs}", op.mnemonic())
        }
        Instruction::AluImm { op, rt, rs, imm } => {
            if op.sign_extends() {
                write!(out, "{} ${rt}, ${rs}, {}", op.mnemonic(), imm as i16)
            } else {
                write!(out, "{} ${rt}, ${rs}, {imm}", op.mnemonic())
            }
        }
        Instruction::Lui { rt, imm } => write!(out, "lui ${rt}, {imm}"),
        Instruction::MulDiv { op, rs, rt } => write!(out, "{} ${rs}, ${rt}", op.mnemonic()),
        Instruction::Mul { rd, rs, rt } => write!(out, "mul ${rd}, ${rs}, ${rt}"),
        Instruction::MoveFrom { hi, rd } => {
            write!(out, "{} ${rd}", if hi { "mfhi" } else { "mflo" })
        }
        Instruction::MoveTo { hi, rs } => write!(out, "{} ${rs}", if hi { "mthi" } else { "mtlo" }),
        Instruction::Branch { cond, rs, rt, offset } => {
            write!(out, "{} ${rs}, ", cond.mnemonic())?;
            if matches!(cond, BranchCond::Eq | BranchCond::Ne) {
                write!(out, "${rt}, ")?;
            }
            match addr {
                Some(pc) => {
                    let target = pc.wrapping_add(4).wrapping_add((i32::from(offset) << 2) as u32);
                    write!(out, "0x{target:08x}")
                }
                None => write!(out, "{offset}"),
            }
        }
        Instruction::Jump { link, target } => {
            let region = addr.map_or(0, |pc| pc.wrapping_add(4) & 0xF000_0000);
            write!(out, "{} 0x{:08x}", if link { "jal" } else { "j" }, region | (target << 2))
        }
        Instruction::JumpReg { link: None, rs } => write!(out, "jr ${rs}"),
        Instruction::JumpReg { link: Some(rd), rs } => write!(out, "jalr ${rd}, ${rs}"),
        Instruction::Load { width, signed, rt, base, offset } => {
            write!(out, "{} ${rt}, {offset}(${base})", load_mnemonic(width, signed))
        }
        Instruction::Store { width, rt, base, offset } => {
            write!(out, "{} ${rt}, {offset}(${base})", store_mnemonic(width))
        }
        Instruction::Mfc0 { rt, rd } => write!(out, "mfc0 ${rt}, ${rd}"),
        Instruction::Mtc0 { rt, rd } => write!(out, "mtc0 ${rt}, ${rd}"),
        Instruction::Eret => out.write_str("eret"),
        Instruction::Syscall => out.write_str("syscall"),
        Instruction::Break { code } => write!(out, "break 0x{code:x}"),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_instruction(f, self, None)
    }
}

/// Disassembles a 32-bit MIPS instruction into a human-readable string.
///
/// Returns a mnemonic like `"addu $2, $4, $5"` or `"unknown"` for
/// unrecognised encodings.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    decode(inst).map_or_else(|| "unknown".to_string(), |d| d.to_string())
}

/// Disassembles an instruction located at `addr`, resolving control-transfer targets.
pub fn disassemble_at(inst: u32, addr: u32) -> String {
    let mut text = String::new();
    match decode(inst) {
        Some(d) => {
            let _ = write_instruction(&mut text, &d, Some(addr));
        }
        None => text.push_str("unknown"),
    }
    text
}

/// Formats a listing of `(address, word)` pairs, one instruction per line.
///
/// Each line reads `[0x00400000]\t0x2402000a  addiu $2, $0, 10`.
pub fn format_insts<I>(words: I) -> String
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut out = String::new();
    for (addr, word) in words {
        let _ = writeln!(out, "[0x{addr:08x}]\t0x{word:08x}  {}", disassemble_at(word, addr));
    }
    out
}
