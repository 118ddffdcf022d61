//! MIPS32 Instruction Decoder.
//!
//! This module turns a 32-bit instruction word into the structured `Instruction`
//! form consumed by the executor and the disassembler. Encodings outside the
//! supported integer subset decode to `None`; the caller raises a
//! reserved-instruction exception.

use crate::isa::instruction::{
    AluOp, BranchCond, ImmOp, Instruction, InstructionBits, MulDivOp, ShiftOp, Width,
};
use crate::isa::opcodes::{self, cop0, funct, funct2, regimm};

/// Decodes a raw 32-bit instruction word.
///
/// # Arguments
///
/// * `inst` - The instruction word, already in host byte order.
///
/// # Returns
///
/// The decoded instruction, or `None` if the encoding is not recognised.
pub fn decode(inst: u32) -> Option<Instruction> {
    let rs = inst.rs();
    let rt = inst.rt();
    let rd = inst.rd();
    let imm = inst.imm();
    let offset = imm as i16;

    let decoded = match inst.opcode() {
        opcodes::OP_SPECIAL => return decode_special(inst),
        opcodes::OP_REGIMM => {
            let cond = match rt as u32 {
                regimm::BLTZ => BranchCond::Ltz,
                regimm::BGEZ => BranchCond::Gez,
                regimm::BLTZAL => BranchCond::Ltzal,
                regimm::BGEZAL => BranchCond::Gezal,
                _ => return None,
            };
            Instruction::Branch { cond, rs, rt: 0, offset }
        }
        opcodes::OP_J => Instruction::Jump { link: false, target: inst.target() },
        opcodes::OP_JAL => Instruction::Jump { link: true, target: inst.target() },
        opcodes::OP_BEQ => Instruction::Branch { cond: BranchCond::Eq, rs, rt, offset },
        opcodes::OP_BNE => Instruction::Branch { cond: BranchCond::Ne, rs, rt, offset },
        opcodes::OP_BLEZ => Instruction::Branch { cond: BranchCond::Lez, rs, rt: 0, offset },
        opcodes::OP_BGTZ => Instruction::Branch { cond: BranchCond::Gtz, rs, rt: 0, offset },
        opcodes::OP_ADDI => Instruction::AluImm { op: ImmOp::Addi, rt, rs, imm },
        opcodes::OP_ADDIU => Instruction::AluImm { op: ImmOp::Addiu, rt, rs, imm },
        opcodes::OP_SLTI => Instruction::AluImm { op: ImmOp::Slti, rt, rs, imm },
        opcodes::OP_SLTIU => Instruction::AluImm { op: ImmOp::Sltiu, rt, rs, imm },
        opcodes::OP_ANDI => Instruction::AluImm { op: ImmOp::Andi, rt, rs, imm },
        opcodes::OP_ORI => Instruction::AluImm { op: ImmOp::Ori, rt, rs, imm },
        opcodes::OP_XORI => Instruction::AluImm { op: ImmOp::Xori, rt, rs, imm },
        opcodes::OP_LUI => Instruction::Lui { rt, imm },
        opcodes::OP_COP0 => match rs as u32 {
            cop0::MF => Instruction::Mfc0 { rt, rd },
            cop0::MT => Instruction::Mtc0 { rt, rd },
            _ if inst == opcodes::ERET => Instruction::Eret,
            _ => return None,
        },
        opcodes::OP_SPECIAL2 if inst.funct() == funct2::MUL => Instruction::Mul { rd, rs, rt },
        opcodes::OP_LB => load(Width::Byte, true, rt, rs, offset),
        opcodes::OP_LH => load(Width::Half, true, rt, rs, offset),
        opcodes::OP_LW => load(Width::Word, true, rt, rs, offset),
        opcodes::OP_LBU => load(Width::Byte, false, rt, rs, offset),
        opcodes::OP_LHU => load(Width::Half, false, rt, rs, offset),
        opcodes::OP_SB => Instruction::Store { width: Width::Byte, rt, base: rs, offset },
        opcodes::OP_SH => Instruction::Store { width: Width::Half, rt, base: rs, offset },
        opcodes::OP_SW => Instruction::Store { width: Width::Word, rt, base: rs, offset },
        _ => return None,
    };
    Some(decoded)
}

const fn load(width: Width, signed: bool, rt: usize, base: usize, offset: i16) -> Instruction {
    Instruction::Load { width, signed, rt, base, offset }
}

fn decode_special(inst: u32) -> Option<Instruction> {
    let rs = inst.rs();
    let rt = inst.rt();
    let rd = inst.rd();
    let shamt = inst.shamt();

    let alu = |op| Some(Instruction::Alu { op, rd, rs, rt });
    let muldiv = |op| Some(Instruction::MulDiv { op, rs, rt });

    match inst.funct() {
        funct::SLL => Some(Instruction::Shift { op: ShiftOp::Sll, rd, rt, shamt }),
        funct::SRL => Some(Instruction::Shift { op: ShiftOp::Srl, rd, rt, shamt }),
        funct::SRA => Some(Instruction::Shift { op: ShiftOp::Sra, rd, rt, shamt }),
        funct::SLLV => Some(Instruction::ShiftVar { op: ShiftOp::Sll, rd, rt, rs }),
        funct::SRLV => Some(Instruction::ShiftVar { op: ShiftOp::Srl, rd, rt, rs }),
        funct::SRAV => Some(Instruction::ShiftVar { op: ShiftOp::Sra, rd, rt, rs }),
        funct::JR => Some(Instruction::JumpReg { link: None, rs }),
        funct::JALR => Some(Instruction::JumpReg { link: Some(rd), rs }),
        funct::SYSCALL => Some(Instruction::Syscall),
        funct::BREAK => Some(Instruction::Break { code: (inst >> 6) & 0x000F_FFFF }),
        funct::MFHI => Some(Instruction::MoveFrom { hi: true, rd }),
        funct::MTHI => Some(Instruction::MoveTo { hi: true, rs }),
        funct::MFLO => Some(Instruction::MoveFrom { hi: false, rd }),
        funct::MTLO => Some(Instruction::MoveTo { hi: false, rs }),
        funct::MULT => muldiv(MulDivOp::Mult),
        funct::MULTU => muldiv(MulDivOp::Multu),
        funct::DIV => muldiv(MulDivOp::Div),
        funct::DIVU => muldiv(MulDivOp::Divu),
        funct::ADD => alu(AluOp::Add),
        funct::ADDU => alu(AluOp::Addu),
        funct::SUB => alu(AluOp::Sub),
        funct::SUBU => alu(AluOp::Subu),
        funct::AND => alu(AluOp::And),
        funct::OR => alu(AluOp::Or),
        funct::XOR => alu(AluOp::Xor),
        funct::NOR => alu(AluOp::Nor),
        funct::SLT => alu(AluOp::Slt),
        funct::SLTU => alu(AluOp::Sltu),
        _ => None,
    }
}
