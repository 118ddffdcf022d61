//! Sanity checks for the test infrastructure.

use crate::common::builder::instruction::Asm;
use crate::common::harness::TestContext;
use spim_core::common::constants::TEXT_BOT;
use spim_core::isa::disasm::disassemble;

#[test]
fn asm_encodes_known_words() {
    let words = Asm::new().addiu(2, 0, 10).syscall().nop().words();
    assert_eq!(words, vec![0x2402_000a, 0x0000_000c, 0x0000_0000]);
}

#[test]
fn asm_li_splits_into_lui_ori() {
    let words = Asm::new().li(8, 0x1234_5678).words();
    assert_eq!(disassemble(words[0]), "lui $8, 4660");
    assert_eq!(disassemble(words[1]), "ori $8, $8, 22136");
}

#[test]
fn harness_loads_program_at_text_bot() {
    let ctx = TestContext::new(&Asm::new().exit().words());
    assert_eq!(ctx.sim.starting_address(), TEXT_BOT);
    assert_eq!(ctx.sim.system().memory.text().bot(), TEXT_BOT);
    assert_eq!(ctx.sim.get_pc(), 0);
}

#[test]
fn harness_captures_output() {
    let mut ctx = TestContext::new(&Asm::new().addiu(4, 0, 'A' as i32).call(11).exit().words());
    ctx.run();
    assert_eq!(ctx.output(), "A\n");
}
