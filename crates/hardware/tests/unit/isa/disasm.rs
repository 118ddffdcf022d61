//! Disassembly text.

use crate::common::builder::instruction::{Asm, r_type};
use pretty_assertions::assert_eq;
use rstest::rstest;
use spim_core::isa::disasm::{disassemble, disassemble_at, format_insts};
use spim_core::isa::opcodes::funct;

#[rstest]
#[case(Asm::new().nop(), "nop")]
#[case(Asm::new().addiu(29, 29, -16), "addiu $29, $29, -16")]
#[case(Asm::new().ori(8, 0, 0xffff), "ori $8, $0, 65535")]
#[case(Asm::new().addu(2, 4, 5), "addu $2, $4, $5")]
#[case(Asm::new().sll(8, 9, 2), "sll $8, $9, 2")]
#[case(Asm::new().lw(31, 12, 29), "lw $31, 12($29)")]
#[case(Asm::new().sb(4, -1, 5), "sb $4, -1($5)")]
#[case(Asm::new().mult(4, 5), "mult $4, $5")]
#[case(Asm::new().mflo(2), "mflo $2")]
#[case(Asm::new().jr(31), "jr $31")]
#[case(Asm::new().syscall(), "syscall")]
#[case(Asm::new().eret(), "eret")]
#[case(Asm::new().mfc0(26, 14), "mfc0 $26, $14")]
fn mnemonics(#[case] asm: Asm, #[case] expected: &str) {
    assert_eq!(disassemble(asm.words()[0]), expected);
}

#[test]
fn unknown_words_disassemble_as_unknown() {
    assert_eq!(disassemble(r_type(0, 0, 0, 0, 0x3f)), "unknown");
    assert_eq!(disassemble(funct::BREAK), "break 0x0");
}

#[test]
fn branch_targets_resolve_with_address() {
    let beq = Asm::new().beq(8, 9, -2).words()[0];
    assert_eq!(disassemble(beq), "beq $8, $9, -2");
    assert_eq!(disassemble_at(beq, 0x0040_0010), "beq $8, $9, 0x0040000c");
}

#[test]
fn jump_targets_resolve_with_address() {
    let jal = Asm::new().jal(0x0040_0100).words()[0];
    assert_eq!(disassemble_at(jal, 0x0040_0000), "jal 0x00400100");
}

#[test]
fn listing_has_one_line_per_word() {
    let words = Asm::new().addiu(2, 0, 10).syscall().words();
    let listing = format_insts([(0x0040_0000, words[0]), (0x0040_0004, words[1])]);
    assert_eq!(
        listing,
        "[0x00400000]\t0x2402000a  addiu $2, $0, 10\n\
         [0x00400004]\t0x0000000c  syscall\n"
    );
}
