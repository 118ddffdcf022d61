//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic for
//! the MIPS32 integer subset SPIM executes.
//!
//! # Modules
//!
//! * `abi`: o32 register roles and names.
//! * `opcodes`: Primary opcode and function-field constants.
//! * `instruction`: Field extraction and the decoded instruction form.
//! * `decode`: Word to `Instruction` translation.
//! * `disasm`: Assembly text for listings and tracing.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for the R, I and J formats.
pub mod decode;

/// Instruction disassembler for listings, debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Opcode, `funct`, `regimm` and coprocessor selector constants.
pub mod opcodes;
