//! System-on-Chip (SoC) Components.
//!
//! This module organizes everything outside the CPU: the segmented memory,
//! the console devices, and the interconnect that routes accesses between them.

/// Console devices and the memory-mapped console window.
pub mod devices;

/// Load/store routing between memory and mapped I/O.
pub mod interconnect;

/// Segmented main memory.
pub mod memory;

pub use interconnect::System;
