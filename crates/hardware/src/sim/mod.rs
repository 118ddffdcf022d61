//! Simulation control.
//!
//! Owns the simulated world and drives it: program loading, bounded
//! execution with breakpoints, and diagnostic reporting.

/// Breakpoint set.
pub mod breakpoints;

/// Bounded execution and step status.
pub mod controller;

/// Executor trait and the MIPS32 executor.
pub mod executor;

/// Program images, the loader trait and the ELF loader.
pub mod loader;

/// Diagnostics.
pub mod report;

/// The simulated world.
pub mod simulator;

pub use breakpoints::BreakpointSet;
pub use controller::StepStatus;
pub use executor::{Executor, Machine, Mips32Executor, RunOutcome};
pub use loader::{ElfLoader, ImageSegment, Loader, ProgramImage, default_exception_handler};
pub use report::{CollectingReporter, Diagnostic, Reporter, Severity, StderrReporter, fatal_error};
pub use simulator::Simulator;
