//! MIPS32 (SPIM) simulator core.
//!
//! This crate drives a simulated MIPS32 processor and exposes its state to a
//! front-end incrementally and differentially. It provides:
//! 1. **Core:** General registers, HI/LO, CP0, and an integer executor with
//!    optional branch delay slots.
//! 2. **Memory:** SPIM's segmented address space with data growth through
//!    `sbrk`, downward stack growth, and a memory-mapped console.
//! 3. **ISA:** Decoding and SPIM-style disassembly.
//! 4. **Simulation:** Program loading, bounded execution with breakpoints,
//!    and diagnostic reporting.
//! 5. **Inspection:** Diff-marked views of memory and registers.
//!
//! ```no_run
//! use spim_core::sim::{ElfLoader, Simulator, StderrReporter, StepStatus};
//! use spim_core::soc::devices::Console;
//! use spim_core::Config;
//!
//! let config = Config::default();
//! let mut sim = Simulator::initialize(
//!     config,
//!     &ElfLoader,
//!     Console::stdio(),
//!     Box::new(StderrReporter::new(false)),
//! )?;
//! while sim.step(0, true) != StepStatus::Completed {
//!     print!("{}", sim.get_general_registers(true));
//! }
//! # Ok::<(), spim_core::common::SimError>(())
//! ```

/// Common types and constants (segments, registers, traps, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (architectural state, execution, traps, syscalls).
pub mod core;
/// Differential state inspection and rendering.
pub mod inspect;
/// Instruction set (decode, instruction, ABI, disassembly).
pub mod isa;
/// Simulated world, execution control, loading and diagnostics.
pub mod sim;
/// System (memory, console, interconnect).
pub mod soc;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, PC and CP0.
pub use crate::core::Cpu;
/// The simulated world; construct with `Simulator::initialize` or `Simulator::from_image`.
pub use crate::sim::Simulator;
/// Memory and console; construct with `System::new`.
pub use crate::soc::System;
