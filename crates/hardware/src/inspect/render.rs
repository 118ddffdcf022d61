//! Presentation of rendered entries.

use std::fmt::Write;

use crate::inspect::snapshot::DiffEntry;
use crate::isa::disasm::format_insts;
use crate::soc::memory::Region;

/// Wraps each entry in `<pre>`, highlighting changed entries in yellow.
pub fn render_html(entries: &[DiffEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let open = if entry.changed {
            "<pre style='background-color: yellow;'>"
        } else {
            "<pre>"
        };
        let _ = write!(out, "{open}{entry}</pre>");
    }
    out
}

/// One entry per line; changed entries end in ` *`.
pub fn render_plain(entries: &[DiffEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let mark = if entry.changed { " *" } else { "" };
        let _ = writeln!(out, "{entry}{mark}");
    }
    out
}

/// Disassembly listing of a text region.
pub fn render_listing(region: &Region) -> String {
    format_insts(region.iter())
}
