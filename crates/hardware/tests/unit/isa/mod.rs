/// Field extraction and decoding.
pub mod decode;

/// Disassembly text.
pub mod disasm;
