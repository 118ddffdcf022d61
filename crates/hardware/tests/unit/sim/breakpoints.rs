use spim_core::sim::BreakpointSet;

#[test]
fn add_is_idempotent_and_sorted() {
    let mut set = BreakpointSet::new();
    set.add(0x0040_0020);
    set.add(0x0040_0000);
    set.add(0x0040_0020);

    assert_eq!(set.len(), 2);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0x0040_0000, 0x0040_0020]);
}

#[test]
fn delete_removes_only_named_address() {
    let mut set = BreakpointSet::new();
    set.add(0x0040_0000);
    set.add(0x0040_0004);

    set.delete(0x0040_0000);
    set.delete(0x0040_0100);

    assert!(!set.contains(0x0040_0000));
    assert!(set.contains(0x0040_0004));
    assert!(!set.is_empty());
}

#[test]
fn new_set_is_empty() {
    let set = BreakpointSet::new();
    assert!(set.is_empty());
    assert!(!set.contains(0));
}
