//! General register file.

use spim_core::common::RegisterFile;

#[test]
fn zero_register_is_hardwired() {
    let mut regs = RegisterFile::new();
    regs.write(0, 0xdead_beef);
    assert_eq!(regs.read(0), 0);
}

#[test]
fn writes_are_visible_in_snapshot() {
    let mut regs = RegisterFile::new();
    for i in 1..32 {
        regs.write(i, i as u32 * 3);
    }
    let snap = regs.snapshot();
    assert_eq!(snap[0], 0);
    assert_eq!(snap[31], 93);
}

#[test]
fn hi_lo_are_independent_of_gprs() {
    let mut regs = RegisterFile::new();
    regs.hi = 1;
    regs.lo = 2;
    assert!(regs.snapshot().iter().all(|&r| r == 0));
}
