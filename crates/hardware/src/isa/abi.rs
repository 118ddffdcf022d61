//! MIPS o32 Application Binary Interface (ABI) register name constants.
//!
//! Defines the register indices used by the system-call interface and the
//! startup code, plus the short names SPIM prints next to each register.

/// Register $0 (always zero).
pub const REG_ZERO: usize = 0;
/// Register $2 (system call number and first return value, v0).
pub const REG_V0: usize = 2;
/// Register $4 (first argument, a0).
pub const REG_A0: usize = 4;
/// Register $5 (second argument, a1).
pub const REG_A1: usize = 5;
/// Register $6 (third argument, a2).
pub const REG_A2: usize = 6;
/// Register $26 (kernel scratch, k0).
pub const REG_K0: usize = 26;
/// Register $28 (global pointer, gp).
pub const REG_GP: usize = 28;
/// Register $29 (stack pointer, sp).
pub const REG_SP: usize = 29;
/// Register $31 (return address, ra).
pub const REG_RA: usize = 31;

/// Short register names in SPIM's spelling, indexed by register number.
pub const REG_NAMES: [&str; 32] = [
    "r0", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "s8", "ra",
];
