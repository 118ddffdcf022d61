//! Field extraction and decoding.

use crate::common::builder::instruction::{Asm, i_type, r_type};
use spim_core::isa::decode::decode;
use spim_core::isa::instruction::{
    AluOp, BranchCond, ImmOp, Instruction, InstructionBits, ShiftOp, Width,
};
use spim_core::isa::opcodes::{ERET, OP_LH, OP_SW, funct};

#[test]
fn fields_extract_from_r_type() {
    let word = r_type(4, 5, 6, 7, funct::ADDU);
    assert_eq!(word.rs(), 4);
    assert_eq!(word.rt(), 5);
    assert_eq!(word.rd(), 6);
    assert_eq!(word.shamt(), 7);
    assert_eq!(word.funct(), funct::ADDU);
}

#[test]
fn immediate_sign_extends() {
    let word = i_type(OP_LH, 29, 8, -4);
    assert_eq!(word.imm(), 0xfffc);
    assert_eq!(word.simm(), -4);
}

#[test]
fn decodes_alu_and_immediate_forms() {
    assert_eq!(
        decode(r_type(1, 2, 3, 0, funct::SUBU)),
        Some(Instruction::Alu { op: AluOp::Subu, rd: 3, rs: 1, rt: 2 })
    );
    assert_eq!(
        decode(Asm::new().addiu(2, 0, 10).words()[0]),
        Some(Instruction::AluImm { op: ImmOp::Addiu, rt: 2, rs: 0, imm: 10 })
    );
    assert_eq!(
        decode(r_type(0, 9, 8, 2, funct::SRA)),
        Some(Instruction::Shift { op: ShiftOp::Sra, rd: 8, rt: 9, shamt: 2 })
    );
}

#[test]
fn decodes_memory_forms() {
    assert_eq!(
        decode(i_type(OP_SW, 29, 31, -8)),
        Some(Instruction::Store { width: Width::Word, rt: 31, base: 29, offset: -8 })
    );
    assert_eq!(
        decode(Asm::new().lbu(4, 3, 5).words()[0]),
        Some(Instruction::Load { width: Width::Byte, signed: false, rt: 4, base: 5, offset: 3 })
    );
}

#[test]
fn decodes_control_forms() {
    assert_eq!(
        decode(Asm::new().bne(8, 0, -3).words()[0]),
        Some(Instruction::Branch { cond: BranchCond::Ne, rs: 8, rt: 0, offset: -3 })
    );
    assert_eq!(
        decode(Asm::new().jr(31).words()[0]),
        Some(Instruction::JumpReg { link: None, rs: 31 })
    );
    assert_eq!(decode(ERET), Some(Instruction::Eret));
    assert_eq!(decode(funct::SYSCALL), Some(Instruction::Syscall));
}

#[test]
fn control_transfers_are_flagged() {
    let branch = decode(Asm::new().beq(0, 0, 1).words()[0]).unwrap();
    let add = decode(r_type(1, 2, 3, 0, funct::ADDU)).unwrap();
    assert!(branch.is_control_transfer());
    assert!(!add.is_control_transfer());
}

#[test]
fn unknown_encodings_decode_to_none() {
    // Floating-point coprocessor and an unused SPECIAL function.
    assert_eq!(decode(0x4600_0000), None);
    assert_eq!(decode(r_type(0, 0, 0, 0, 0x3f)), None);
}
