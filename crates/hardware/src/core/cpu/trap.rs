//! Trap Handling Logic.
//!
//! This module implements exception entry and return for the CPU. It performs
//! the following:
//! 1. **Context Saving:** Latches EPC, Cause and BadVAddr and raises Status.EXL.
//! 2. **Reporting:** Announces every exception through the run-error channel.
//! 3. **Dispatch:** Vectors to the kernel handler at `0x8000_0180`, or halts when
//!    no kernel text is loaded there. Fetch faults always halt.
//! 4. **Delay Slots:** A trap in a delay slot points EPC at the branch, sets
//!    Cause.BD, and keeps the branch target for the return.
//! 5. **Return Handling:** Implements `eret`.

use tracing::debug;

use super::Cpu;
use crate::common::Trap;
use crate::common::constants::EXCEPTION_VECTOR;
use crate::core::arch::cp0::{CAUSE_BD, CAUSE_EXC_CODE_SHIFT, STATUS_EXL};
use crate::report_run_error;
use crate::sim::report::Reporter;
use crate::soc::System;

/// Where to continue when a handler skips a faulting delay-slot instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SlotResume {
    /// Address of the delay slot, which is EPC + 4.
    slot: u32,
    /// The branch outcome the slot was waiting on.
    target: u32,
}

impl Cpu {
    /// Latches `cause` into CP0 and announces it, without redirecting control.
    fn record_exception(&mut self, cause: &Trap, epc: u32, reporter: &mut dyn Reporter) {
        self.cp0.epc = epc;
        self.cp0.cause = cause.code() << CAUSE_EXC_CODE_SHIFT;
        if let Some(addr) = cause.bad_vaddr() {
            self.cp0.bad_vaddr = addr;
        }
        self.cp0.status |= STATUS_EXL;

        debug!(%cause, epc = format_args!("{epc:#010x}"), "trap");
        report_run_error!(
            reporter,
            "Exception {} [{}] occurred at PC=0x{:08x}",
            cause.code(),
            cause.description(),
            epc
        );
    }

    /// Takes a trap raised by the instruction at `epc`.
    ///
    /// # Arguments
    ///
    /// * `cause` - The exception being raised.
    /// * `epc` - Address of the faulting instruction.
    /// * `bus` - Consulted for the presence of a handler at the exception vector.
    /// * `reporter` - Receives the exception announcement.
    pub fn take_trap(
        &mut self,
        cause: &Trap,
        epc: u32,
        bus: &System,
        reporter: &mut dyn Reporter,
    ) {
        self.record_exception(cause, epc, reporter);
        if bus.memory.kernel_text().contains(EXCEPTION_VECTOR) {
            self.set_pc(EXCEPTION_VECTOR);
        } else {
            report_run_error!(reporter, "No exception handler installed; execution halted");
            self.halted = true;
        }
    }

    /// Takes a trap raised while executing the instruction at `pc`.
    ///
    /// Outside a delay slot this is [`Cpu::take_trap`]. Inside one, EPC names
    /// the branch, Cause.BD is set, and the pending `npc` is kept so that a
    /// handler returning to EPC + 4 continues at the branch outcome rather
    /// than falling through.
    pub(crate) fn raise(
        &mut self,
        cause: &Trap,
        pc: u32,
        in_slot: bool,
        bus: &System,
        reporter: &mut dyn Reporter,
    ) {
        if !in_slot {
            self.take_trap(cause, pc, bus, reporter);
            return;
        }
        let target = self.npc;
        self.take_trap(cause, pc.wrapping_sub(4), bus, reporter);
        self.cp0.cause |= CAUSE_BD;
        if !self.halted {
            self.slot_resume = Some(SlotResume { slot: pc, target });
        }
    }

    /// Halts on an instruction fetch from outside the text segments.
    ///
    /// A handler cannot resume such a program, so the fault is recorded in CP0
    /// and execution stops with PC left at the bad address.
    pub(crate) fn fetch_fault(&mut self, cause: &Trap, pc: u32, reporter: &mut dyn Reporter) {
        self.record_exception(cause, pc, reporter);
        report_run_error!(reporter, "Attempt to execute non-instruction at 0x{pc:08x}");
        self.halted = true;
    }

    /// Leaves exception level and returns the address to resume at.
    ///
    /// This is EPC, except after a delay-slot trap whose handler advanced EPC
    /// past the branch: execution then resumes at the branch outcome, skipping
    /// the faulting slot.
    pub const fn exception_return(&mut self) -> u32 {
        self.cp0.status &= !STATUS_EXL;
        let epc = self.cp0.epc;
        let resume = self.slot_resume;
        self.slot_resume = None;
        match resume {
            Some(r) if r.slot == epc => r.target,
            _ => epc,
        }
    }
}
