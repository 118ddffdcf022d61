//! Instruction executors.
//!
//! The execution controller never runs instructions itself; it hands a
//! [`Machine`] to an [`Executor`] for a bounded number of steps. This module
//! provides:
//! 1. **Executor Trait:** The seam between bounded execution and instruction semantics.
//! 2. **Machine View:** Borrowed access to CPU, bus, breakpoints and reporter for one run.
//! 3. **Reference Executor:** `Mips32Executor`, which steps the MIPS32 core.

use std::fmt;

use tracing::debug;

use crate::core::Cpu;
use crate::sim::breakpoints::BreakpointSet;
use crate::sim::report::Reporter;
use crate::soc::System;

/// Mutable view of the simulated machine lent to an executor for one run.
pub struct Machine<'a> {
    /// Architectural state.
    pub cpu: &'a mut Cpu,
    /// Memory and console.
    pub bus: &'a mut System,
    /// Addresses to stop at.
    pub breakpoints: &'a BreakpointSet,
    /// Sink for run-time errors.
    pub reporter: &'a mut dyn Reporter,
}

impl fmt::Debug for Machine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("pc", &format_args!("{:#010x}", self.cpu.pc))
            .field("breakpoints", &self.breakpoints.len())
            .finish_non_exhaustive()
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Execution stopped in front of a breakpoint.
    pub breakpoint: bool,
    /// The program can execute further instructions.
    pub continuable: bool,
}

/// Runs instructions on a [`Machine`].
pub trait Executor: Send {
    /// Executes up to `steps` instructions starting at `start`.
    ///
    /// # Arguments
    ///
    /// * `machine` - The machine to run.
    /// * `start` - Address of the first instruction.
    /// * `steps` - Instruction budget.
    /// * `continue_past_breakpoint` - Execute the first instruction even if a
    ///   breakpoint is set on it.
    ///
    /// # Returns
    ///
    /// `continuable == false` once the program has halted. A breakpoint stop
    /// leaves PC at the breakpoint address.
    fn run(
        &mut self,
        machine: Machine<'_>,
        start: u32,
        steps: u32,
        continue_past_breakpoint: bool,
    ) -> RunOutcome;
}

/// Executor for the MIPS32 integer core.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mips32Executor;

impl Executor for Mips32Executor {
    fn run(
        &mut self,
        machine: Machine<'_>,
        start: u32,
        steps: u32,
        continue_past_breakpoint: bool,
    ) -> RunOutcome {
        let Machine {
            cpu,
            bus,
            breakpoints,
            reporter,
        } = machine;

        // Resuming at PC must keep a pending delay-slot target.
        if cpu.pc != start {
            cpu.set_pc(start);
        }

        for executed in 0..steps {
            if cpu.halted {
                break;
            }
            if breakpoints.contains(cpu.pc) && !(executed == 0 && continue_past_breakpoint) {
                debug!(pc = format_args!("{:#010x}", cpu.pc), "breakpoint");
                return RunOutcome {
                    breakpoint: true,
                    continuable: true,
                };
            }
            cpu.step(bus, reporter);
        }

        RunOutcome {
            breakpoint: false,
            continuable: !cpu.halted,
        }
    }
}
