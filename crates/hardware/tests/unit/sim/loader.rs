use std::io::Write;
use std::path::PathBuf;

use crate::common::builder::elf::{EM_386, ElfBuilder};
use crate::common::builder::instruction::Asm;
use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use rstest::rstest;
use spim_core::common::SimError;
use spim_core::common::constants::{DATA_BOT, EXCEPTION_VECTOR, TEXT_BOT};
use spim_core::config::Config;
use spim_core::sim::{
    CollectingReporter, ElfLoader, Loader, ProgramImage, Simulator, StepStatus,
    default_exception_handler,
};
use spim_core::soc::devices::{BufferedDevice, Console};
use spim_core::soc::memory::Endian;
use tempfile::NamedTempFile;

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn quiet_console() -> Console {
    Console::new(Box::new(BufferedDevice::new()))
}

#[test]
fn with_words_encodes_in_image_byte_order() {
    let little = ProgramImage::new(TEXT_BOT).with_words(TEXT_BOT, &[0x1122_3344]);
    let big = ProgramImage::new(TEXT_BOT)
        .with_endian(Endian::Big)
        .with_words(TEXT_BOT, &[0x1122_3344]);

    assert_eq!(little.segments()[0].bytes, vec![0x44, 0x33, 0x22, 0x11]);
    assert_eq!(big.segments()[0].bytes, vec![0x11, 0x22, 0x33, 0x44]);
    assert_eq!(big.endian(), Endian::Big);
}

#[test]
fn default_handler_sits_at_exception_vector() {
    let handler = default_exception_handler(Endian::Little);

    assert_eq!(handler.entry(), EXCEPTION_VECTOR);
    assert_eq!(handler.segments().len(), 1);
    assert_eq!(handler.segments()[0].addr, EXCEPTION_VECTOR);
    assert_eq!(handler.segments()[0].bytes.len(), 16);
}

#[test]
fn elf_segments_are_zero_padded_to_memory_size() {
    let mut elf = ElfBuilder::mips(TEXT_BOT, TEXT_BOT, &Asm::new().exit().words());
    elf.bss = 8;

    let image = ElfLoader.parse(&elf.build()).unwrap();

    assert_eq!(image.entry(), TEXT_BOT);
    assert_eq!(image.endian(), Endian::Little);
    let segment = &image.segments()[0];
    assert_eq!(segment.addr, TEXT_BOT);
    assert_eq!(segment.bytes.len(), 8);
    assert_eq!(segment.zero_fill, 8);

    let ctx = TestContext::from_image(Config::default(), &image);
    let text = ctx.sim.system().memory.text();
    assert_eq!(text.top(), TEXT_BOT + 16);
    assert_eq!(ctx.sim.system().memory.read_word(TEXT_BOT + 12), Ok(0));
}

#[rstest]
#[case(TEXT_BOT, 0xfff0_0000, "text")]
#[case(DATA_BOT, 0x0200_0000, "data")]
fn oversized_memory_size_is_rejected_before_allocation(
    #[case] vaddr: u32,
    #[case] bss: u32,
    #[case] segment: &str,
) {
    let mut elf = ElfBuilder::mips(TEXT_BOT, vaddr, &[0, 0]);
    elf.bss = bss;
    let image = ElfLoader.parse(&elf.build()).unwrap();
    assert_eq!(image.segments()[0].zero_fill, bss);

    let result = Simulator::from_image(
        Config::default(),
        &image,
        quiet_console(),
        Box::new(CollectingReporter::new()),
    );

    match result {
        Err(SimError::SegmentOverflow { segment: name, .. }) => assert_eq!(name, segment),
        other => panic!("expected a segment overflow, got {other:?}"),
    }
}

#[test]
fn big_endian_elf_runs() {
    let code = Asm::new().addiu(4, 0, 7).call(1).exit().words();
    let mut elf = ElfBuilder::mips(TEXT_BOT, TEXT_BOT, &code);
    elf.big_endian = true;

    let image = ElfLoader.parse(&elf.build()).unwrap();
    assert_eq!(image.endian(), Endian::Big);

    let mut ctx = TestContext::from_image(Config::default(), &image);
    assert_eq!(ctx.run(), StepStatus::Completed);
    assert_eq!(ctx.output(), "7\n");
}

#[test]
fn initialize_reads_program_from_disk() {
    let code = Asm::new().addiu(4, 0, 5).call(17).words();
    let file = write_temp(&ElfBuilder::mips(TEXT_BOT, TEXT_BOT, &code).build());
    let mut config = Config::default();
    config.general.program = file.path().to_path_buf();

    let mut sim = Simulator::initialize(
        config,
        &ElfLoader,
        quiet_console(),
        Box::new(CollectingReporter::new()),
    )
    .unwrap();

    assert_eq!(sim.step(0, false), StepStatus::Completed);
    assert_eq!(sim.exit_code(), Some(5));
}

#[test]
fn garbage_is_not_an_elf() {
    let result = ElfLoader.parse(b"definitely not an executable");
    assert!(matches!(result, Err(SimError::Elf(_))));
}

#[test]
fn foreign_architecture_is_rejected() {
    let mut elf = ElfBuilder::mips(TEXT_BOT, TEXT_BOT, &[0]);
    elf.machine = EM_386;

    let result = ElfLoader.parse(&elf.build());
    assert!(matches!(result, Err(SimError::UnsupportedImage(_))));
}

#[test]
fn missing_program_is_an_io_error() {
    let mut config = Config::default();
    config.general.program = PathBuf::from("/nonexistent/program.elf");

    let result = Simulator::initialize(
        config,
        &ElfLoader,
        quiet_console(),
        Box::new(CollectingReporter::new()),
    );
    assert!(matches!(result, Err(SimError::Io { .. })));
}

#[test]
fn missing_exception_handler_is_reported_by_path() {
    let path = PathBuf::from("/nonexistent/trap.handler");
    let mut config = Config::default();
    config.system.exception_handler = Some(path.clone());
    let image = ProgramImage::new(TEXT_BOT).with_words(TEXT_BOT, &Asm::new().exit().words());

    let result = Simulator::from_image(
        config,
        &image,
        quiet_console(),
        Box::new(CollectingReporter::new()),
    );
    match result {
        Err(SimError::MissingExceptionHandler(p)) => assert_eq!(p, path),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn configured_handler_replaces_default() {
    // A handler that sets $s0 before skipping the faulting instruction.
    let handler_code = Asm::new()
        .addiu(16, 0, 0x55)
        .word(0x401a_7000)
        .addiu(26, 26, 4)
        .word(0x409a_7000)
        .eret()
        .words();
    let handler = write_temp(
        &ElfBuilder::mips(EXCEPTION_VECTOR, EXCEPTION_VECTOR, &handler_code).build(),
    );
    let mut config = Config::default();
    config.system.exception_handler = Some(handler.path().to_path_buf());

    let program = Asm::new().brk().exit();
    let image = ProgramImage::new(TEXT_BOT).with_words(TEXT_BOT, &program.words());
    let mut ctx = TestContext::from_image(config, &image);

    assert_eq!(ctx.run(), StepStatus::Completed);
    assert_eq!(ctx.reg(16), 0x55);
}
