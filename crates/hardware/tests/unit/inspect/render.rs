use crate::common::builder::instruction::Asm;
use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use spim_core::inspect::{DiffEntry, render_html, render_plain};

fn entry(label: &str, address: Option<u32>, value: u32, changed: bool) -> DiffEntry {
    DiffEntry {
        label: label.to_string(),
        address,
        old: 0,
        value,
        changed,
    }
}

#[test]
fn html_wraps_each_entry() {
    let entries = [
        entry("[0x10000000]", Some(0x1000_0000), 7, false),
        entry("R8  (t0)", None, 0xff, true),
    ];

    assert_eq!(
        render_html(&entries),
        "<pre>[0x10000000] 0x00000007</pre>\
         <pre style='background-color: yellow;'>R8  (t0) = 000000ff</pre>"
    );
}

#[test]
fn plain_marks_changes_with_star() {
    let entries = [
        entry("[0x7ffffff0]", Some(0x7fff_fff0), 1, true),
        entry("[0x7ffffff4]", Some(0x7fff_fff4), 0, false),
    ];

    assert_eq!(
        render_plain(&entries),
        "[0x7ffffff0] 0x00000001 *\n[0x7ffffff4] 0x00000000\n"
    );
}

#[test]
fn empty_views_render_empty() {
    assert_eq!(render_html(&[]), "");
    assert_eq!(render_plain(&[]), "");
}

#[test]
fn user_text_listing() {
    let ctx = TestContext::new(&Asm::new().exit().words());

    assert_eq!(
        ctx.sim.get_user_text(),
        "[0x00400000]\t0x2402000a  addiu $2, $0, 10\n\
         [0x00400004]\t0x0000000c  syscall\n"
    );
}

#[test]
fn kernel_text_lists_default_handler() {
    let ctx = TestContext::new(&Asm::new().exit().words());
    let listing = ctx.sim.get_kernel_text();

    assert_eq!(listing.lines().count(), 4);
    assert!(listing.starts_with("[0x80000180]\t0x401a7000"));
    assert!(listing.lines().last().unwrap().ends_with("eret"));
}

#[test]
fn diff_entries_serialize_for_hosts() {
    let json = serde_json::to_value(entry("[0x10000000]", Some(0x1000_0000), 7, true)).unwrap();

    assert_eq!(json["label"], "[0x10000000]");
    assert_eq!(json["address"], 0x1000_0000);
    assert_eq!(json["changed"], true);
}
