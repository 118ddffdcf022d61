use crate::common::builder::instruction::Asm;
use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use spim_core::common::constants::{DATA_BOT, K_DATA_BOT, TEXT_BOT};
use spim_core::config::Config;
use spim_core::isa::abi::{REG_A0, REG_V0};
use spim_core::sim::ProgramImage;

const T0: usize = 8;
const T1: usize = 9;

fn with_data(code: &Asm, data: &[u32]) -> TestContext {
    let image = ProgramImage::new(TEXT_BOT)
        .with_words(TEXT_BOT, &code.words())
        .with_words(DATA_BOT, data);
    TestContext::from_image(Config::default(), &image)
}

#[test]
fn zero_words_are_hidden() {
    let mut ctx = TestContext::new(&Asm::new().exit().words());

    assert!(ctx.sim.snapshot_data(false).is_empty());
    assert_eq!(ctx.sim.get_user_data(true), "");
}

#[test]
fn first_render_marks_loaded_words_only_when_diffing() {
    let mut plain = with_data(&Asm::new().exit(), &[0, 7]);
    let entries = plain.sim.snapshot_data(false);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "[0x10000004]");
    assert_eq!(entries[0].value, 7);
    assert!(!entries[0].changed);

    let mut diffed = with_data(&Asm::new().exit(), &[0, 7]);
    assert!(diffed.sim.snapshot_data(true)[0].changed);
}

#[test]
fn unchanged_words_are_not_marked() {
    let mut ctx = with_data(&Asm::new().exit(), &[1, 2, 3]);

    let _ = ctx.sim.snapshot_data(false);
    let second = ctx.sim.snapshot_data(true);

    assert_eq!(second.len(), 3);
    assert!(second.iter().all(|e| !e.changed));
}

#[test]
fn stores_are_marked_once() {
    let program = Asm::new().li(T0, DATA_BOT).addiu(T1, 0, 9).sw(T1, 8, T0).exit();
    let mut ctx = with_data(&program, &[1]);
    let _ = ctx.sim.snapshot_data(false);

    let _ = ctx.run();
    let after = ctx.sim.snapshot_data(true);
    assert_eq!(
        after.iter().map(|e| (e.label.as_str(), e.value, e.changed)).collect::<Vec<_>>(),
        vec![("[0x10000000]", 1, false), ("[0x10000008]", 9, true)]
    );
    assert_eq!(after[1].old, 0);

    assert!(ctx.sim.snapshot_data(true).iter().all(|e| !e.changed));
}

#[test]
fn cleared_word_reappears_as_changed() {
    let program = Asm::new()
        .li(T0, DATA_BOT)
        .sw(0, 0, T0)
        .addiu(T1, 0, 7)
        .sw(T1, 0, T0)
        .exit();
    let mut ctx = with_data(&program, &[7]);
    let _ = ctx.sim.snapshot_data(false);

    let _ = ctx.step(3);
    assert!(ctx.sim.snapshot_data(true).is_empty());

    let _ = ctx.step(2);
    let entries = ctx.sim.snapshot_data(true);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].changed);
}

#[test]
fn grown_segment_is_rendered() {
    let program = Asm::new()
        .addiu(REG_A0, 0, 16)
        .call(9)
        .addiu(T1, 0, 5)
        .sw(T1, 4, REG_V0)
        .exit();
    let mut ctx = TestContext::new(&program.words());
    assert!(ctx.sim.snapshot_data(false).is_empty());

    let _ = ctx.run();
    let entries = ctx.sim.snapshot_data(true);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "[0x10010004]");
    assert!(entries[0].changed);
    assert_eq!(
        ctx.sim.system().memory.data().top(),
        DATA_BOT + Config::default().memory.data_size + 16
    );
}

#[test]
fn html_highlights_changed_words() {
    let program = Asm::new().li(T0, DATA_BOT).addiu(T1, 0, 7).sw(T1, 0, T0).exit();
    let mut ctx = TestContext::new(&program.words());
    let _ = ctx.sim.get_user_data(false);
    let _ = ctx.run();

    assert_eq!(
        ctx.sim.get_user_data(true),
        "<pre style='background-color: yellow;'>[0x10000000] 0x00000007</pre>"
    );
    assert_eq!(ctx.sim.get_user_data(true), "<pre>[0x10000000] 0x00000007</pre>");
}

#[test]
fn kernel_data_is_never_highlighted() {
    let image = ProgramImage::new(TEXT_BOT)
        .with_words(TEXT_BOT, &Asm::new().exit().words())
        .with_words(K_DATA_BOT, &[0xdead_beef]);
    let mut ctx = TestContext::from_image(Config::default(), &image);

    assert_eq!(ctx.sim.get_kernel_data(), "<pre>[0x90000000] 0xdeadbeef</pre>");
    assert_eq!(ctx.sim.get_kernel_data(), "<pre>[0x90000000] 0xdeadbeef</pre>");
}

#[test]
fn zero_filled_growth_renders_empty() {
    // Data spans 0x10000000..0x10010010 once sbrk adds four zero words.
    let program = Asm::new().addiu(REG_A0, 0, 16).call(9).exit();
    let mut ctx = TestContext::new(&program.words());
    let _ = ctx.run();

    assert_eq!(ctx.sim.system().memory.data().top(), 0x1001_0010);
    assert_eq!(ctx.sim.get_user_data(false), "");
}

#[test]
fn growth_keeps_existing_words_unmarked() {
    let program = Asm::new().addiu(REG_A0, 0, 64).call(9).exit();
    let mut ctx = with_data(&program, &[5, 6, 7]);
    let _ = ctx.sim.snapshot_data(false);

    let _ = ctx.run();
    let entries = ctx.sim.snapshot_data(true);

    assert_eq!(
        entries.iter().map(|e| (e.value, e.changed)).collect::<Vec<_>>(),
        vec![(5, false), (6, false), (7, false)]
    );
    assert_eq!(
        ctx.sim.system().memory.data().top(),
        DATA_BOT + Config::default().memory.data_size + 64
    );
}
