use spim_core::common::constants::{DATA_BOT, K_DATA_BOT, K_TEXT_BOT, STACK_TOP, TEXT_BOT};
use spim_core::common::{SimError, Trap};
use spim_core::config::MemoryConfig;
use spim_core::soc::memory::{Endian, Memory};

fn memory() -> Memory {
    Memory::new(&MemoryConfig::default())
}

#[test]
fn initial_layout() {
    let mem = memory();
    let config = MemoryConfig::default();

    assert!(mem.text().is_empty());
    assert!(mem.kernel_text().is_empty());
    assert_eq!(mem.data().bot(), DATA_BOT);
    assert_eq!(mem.data().top(), DATA_BOT + config.data_size);
    assert_eq!(mem.stack().top(), STACK_TOP);
    assert_eq!(mem.stack_floor(), STACK_TOP - config.stack_limit);
}

#[test]
fn little_endian_byte_lanes() {
    let mut mem = memory();
    mem.write_word(DATA_BOT, 0x1122_3344).unwrap();

    assert_eq!(mem.read_byte(DATA_BOT), Ok(0x44));
    assert_eq!(mem.read_byte(DATA_BOT + 3), Ok(0x11));
    assert_eq!(mem.read_half(DATA_BOT + 2), Ok(0x1122));
}

#[test]
fn big_endian_byte_lanes() {
    let mut mem = memory();
    mem.set_endian(Endian::Big);
    mem.write_word(DATA_BOT, 0x1122_3344).unwrap();

    assert_eq!(mem.read_byte(DATA_BOT), Ok(0x11));
    assert_eq!(mem.read_half(DATA_BOT), Ok(0x1122));
    mem.write_byte(DATA_BOT + 3, 0xaa).unwrap();
    assert_eq!(mem.read_word(DATA_BOT), Ok(0x1122_33aa));
}

#[test]
fn sub_word_stores_preserve_neighbours() {
    let mut mem = memory();
    mem.write_word(DATA_BOT, 0xffff_ffff).unwrap();
    mem.write_half(DATA_BOT, 0x0102).unwrap();
    mem.write_byte(DATA_BOT + 2, 0x03).unwrap();

    assert_eq!(mem.read_word(DATA_BOT), Ok(0xff03_0102));
}

#[test]
fn misaligned_accesses_trap() {
    let mut mem = memory();

    assert_eq!(mem.read_word(DATA_BOT + 1), Err(Trap::AddressErrorLoad(DATA_BOT + 1)));
    assert_eq!(mem.read_half(DATA_BOT + 3), Err(Trap::AddressErrorLoad(DATA_BOT + 3)));
    assert_eq!(
        mem.write_word(DATA_BOT + 2, 0),
        Err(Trap::AddressErrorStore(DATA_BOT + 2))
    );
    assert_eq!(
        mem.write_half(DATA_BOT + 1, 0),
        Err(Trap::AddressErrorStore(DATA_BOT + 1))
    );
}

#[test]
fn unmapped_accesses_trap() {
    let mut mem = memory();

    assert_eq!(mem.read_word(0x1000), Err(Trap::AddressErrorLoad(0x1000)));
    assert_eq!(mem.read_byte(0x1001), Err(Trap::AddressErrorLoad(0x1001)));
    assert_eq!(mem.write_byte(0x1001, 1), Err(Trap::AddressErrorStore(0x1001)));
    assert_eq!(mem.peek_word(0x1000), None);
}

#[test]
fn only_text_is_executable() {
    let mut mem = memory();
    mem.load_bytes(TEXT_BOT, &[0x0c, 0, 0, 0], 0).unwrap();

    assert_eq!(mem.fetch(TEXT_BOT), Ok(0x0000_000c));
    assert_eq!(mem.fetch(DATA_BOT), Err(Trap::BusErrorFetch(DATA_BOT)));
    assert_eq!(mem.fetch(TEXT_BOT + 1), Err(Trap::AddressErrorLoad(TEXT_BOT + 1)));
}

#[test]
fn stores_below_stack_grow_it() {
    let mut mem = memory();
    let below = mem.stack().bot() - 64;

    mem.write_word(below, 7).unwrap();

    assert_eq!(mem.stack().bot(), below);
    assert_eq!(mem.read_word(below), Ok(7));
    assert_eq!(mem.read_word(below + 4), Ok(0));
}

#[test]
fn loads_below_stack_do_not_grow_it() {
    let mem = memory();
    let below = mem.stack().bot() - 4;

    assert_eq!(mem.read_word(below), Err(Trap::AddressErrorLoad(below)));
}

#[test]
fn stack_cannot_grow_past_its_limit() {
    let mut mem = memory();
    let beyond = mem.stack_floor() - 4;

    assert_eq!(mem.write_word(beyond, 1), Err(Trap::AddressErrorStore(beyond)));
}

#[test]
fn sbrk_rounds_to_words_and_returns_old_break() {
    let mut mem = memory();
    let top = mem.data().top();

    assert_eq!(mem.sbrk(0), Some(top));
    assert_eq!(mem.sbrk(5), Some(top));
    assert_eq!(mem.data().top(), top + 8);
    assert_eq!(mem.read_word(top + 4), Ok(0));
}

#[test]
fn sbrk_rejects_negative_and_over_limit() {
    let config = MemoryConfig {
        data_size: 0x100,
        data_limit: 0x200,
        ..MemoryConfig::default()
    };
    let mut mem = Memory::new(&config);

    assert_eq!(mem.sbrk(-4), None);
    assert_eq!(mem.sbrk(0x100), Some(DATA_BOT + 0x100));
    assert_eq!(mem.sbrk(4), None);
    assert_eq!(mem.data().top(), DATA_BOT + 0x200);
}

#[test]
fn load_bytes_routes_by_segment() {
    let mut mem = memory();
    mem.load_bytes(K_TEXT_BOT + 0x180, &[1, 2, 3, 4], 0).unwrap();

    assert!(mem.kernel_text().contains(K_TEXT_BOT + 0x180));
    assert_eq!(mem.kernel_text().bot(), K_TEXT_BOT + 0x180);
    assert_eq!(mem.fetch(K_TEXT_BOT + 0x180), Ok(0x0403_0201));
}

#[test]
fn load_bytes_extends_data() {
    let mut mem = memory();
    let top = mem.data().top();
    mem.load_bytes(top, b"tail", 0).unwrap();

    assert_eq!(mem.data().top(), top + 4);
    assert_eq!(mem.read_byte(top + 3), Ok(b'l'));
}

#[test]
fn load_bytes_rejects_unplaceable_segments() {
    let mut mem = memory();

    assert!(matches!(
        mem.load_bytes(0x100, &[0; 4], 0),
        Err(SimError::SegmentOverflow { segment: "unmapped", .. })
    ));
    assert!(matches!(
        mem.load_bytes(0xffff_0000, &[0; 4], 0),
        Err(SimError::SegmentOverflow { .. })
    ));
    assert!(matches!(
        mem.load_bytes(DATA_BOT + 0x0200_0000, &[0; 4], 0),
        Err(SimError::SegmentOverflow { segment: "data", .. })
    ));
}

#[test]
fn zero_fill_extent_is_bounded_before_growth() {
    let mut mem = memory();

    mem.load_bytes(TEXT_BOT, &[1, 0, 0, 0], 12).unwrap();
    assert_eq!(mem.text().top(), TEXT_BOT + 16);
    assert_eq!(mem.read_word(TEXT_BOT + 12), Ok(0));

    assert!(matches!(
        mem.load_bytes(TEXT_BOT, &[], u32::MAX),
        Err(SimError::SegmentOverflow { segment: "text", .. })
    ));
    assert!(matches!(
        mem.load_bytes(K_DATA_BOT, &[], 0x0200_0000),
        Err(SimError::SegmentOverflow { segment: "kernel data", .. })
    ));
    let kernel_words = MemoryConfig::default().kernel_data_size as usize / 4;
    assert_eq!(mem.kernel_data().words().len(), kernel_words);
}

#[test]
fn room_above_reaches_region_top() {
    let mem = memory();

    assert_eq!(mem.room_above(DATA_BOT), MemoryConfig::default().data_size);
    assert_eq!(mem.room_above(STACK_TOP - 4), 4);
    assert_eq!(mem.room_above(0x100), 0);
}

#[test]
fn empty_load_is_a_no_op() {
    let mut mem = memory();
    mem.load_bytes(0, &[], 0).unwrap();
    assert!(mem.text().is_empty());
}
