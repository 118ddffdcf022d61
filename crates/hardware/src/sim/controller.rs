//! Execution Controller.
//!
//! Bounded execution of the simulated program. It performs the following:
//! 1. **Start Address:** Uses the image entry point until PC has been set, then resumes at PC.
//! 2. **Budget:** Substitutes the configured default for a zero step count.
//! 3. **Delegation:** Runs the executor and classifies the outcome as a [`StepStatus`].
//! 4. **Breakpoints:** Maintains the breakpoint set consulted by the executor.

use tracing::debug;

use crate::report_error;
use crate::sim::executor::Machine;
use crate::sim::simulator::Simulator;

/// Result of a call to [`Simulator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// The program can run no further.
    Completed,
    /// Execution stopped in front of a breakpoint.
    Breakpoint,
    /// The step budget ran out; more instructions remain.
    Running,
}

impl StepStatus {
    /// Integer form used across embedding boundaries: 0, -1 and 1.
    pub const fn code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::Breakpoint => -1,
            Self::Running => 1,
        }
    }
}

impl Simulator {
    /// Runs up to `step_size` instructions.
    ///
    /// # Arguments
    ///
    /// * `step_size` - Instruction budget; 0 selects `config.general.default_run_steps`.
    /// * `continue_past_breakpoint` - Execute the first instruction even when a
    ///   breakpoint is set on it, so a stopped program can resume.
    ///
    /// # Returns
    ///
    /// `Completed` once the program has halted (a newline is written to the
    /// console the first time), `Breakpoint` with PC at the breakpoint, or
    /// `Running` when the budget is exhausted.
    pub fn step(&mut self, step_size: u32, continue_past_breakpoint: bool) -> StepStatus {
        if self.completed {
            return StepStatus::Completed;
        }
        let start = if self.cpu.pc == 0 {
            self.starting_address()
        } else {
            self.cpu.pc
        };
        let budget = if step_size == 0 {
            self.config.general.default_run_steps
        } else {
            step_size
        };
        debug!(
            start = format_args!("{start:#010x}"),
            budget, continue_past_breakpoint, "step"
        );

        let outcome = self.executor.run(
            Machine {
                cpu: &mut self.cpu,
                bus: &mut self.bus,
                breakpoints: &self.breakpoints,
                reporter: &mut *self.reporter,
            },
            start,
            budget,
            continue_past_breakpoint,
        );

        if !outcome.continuable {
            self.completed = true;
            self.bus.console.write_char(b'\n');
            debug!(
                retired = self.cpu.instructions_retired,
                exit_code = ?self.cpu.exit_code,
                "program completed"
            );
            return StepStatus::Completed;
        }
        if outcome.breakpoint {
            report_error!(self.reporter, "Breakpoint encountered at 0x{:08x}", self.cpu.pc);
            return StepStatus::Breakpoint;
        }
        StepStatus::Running
    }

    /// Stops execution in front of the instruction at `addr`.
    pub fn add_breakpoint(&mut self, addr: u32) {
        self.breakpoints.add(addr);
    }

    /// Removes the breakpoint at `addr`, if any.
    pub fn delete_breakpoint(&mut self, addr: u32) {
        self.breakpoints.delete(addr);
    }

    /// Current breakpoints in ascending order.
    pub fn breakpoints(&self) -> Vec<u32> {
        self.breakpoints.iter().collect()
    }

    /// Returns true once the program has halted.
    pub const fn is_completed(&self) -> bool {
        self.completed
    }
}
