//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which holds the
//! architectural state of the MIPS32 processor. It coordinates the following:
//! 1. **State Management:** General registers, HI/LO, PC with its successor, and CP0.
//! 2. **Execution:** Fetch, decode and execute of one instruction per step.
//! 3. **Exceptions:** Trap entry through CP0 and return through `eret`.
//! 4. **System Calls:** SPIM's console and memory services.

/// Instruction execution and control transfer.
pub mod execution;

/// Load and store operations.
pub mod memory;

/// System-call service.
pub mod syscall;

/// Exception entry and return.
pub mod trap;

use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::arch::cp0::Cp0;
use trap::SlotResume;

/// Main CPU structure containing all processor state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers and HI/LO.
    pub regs: RegisterFile,
    /// Address of the instruction executed next. Zero until execution starts.
    pub pc: u32,
    /// Address of the instruction after `pc`; differs from `pc + 4` in a delay slot.
    pub npc: u32,
    /// Coprocessor 0 registers.
    pub cp0: Cp0,
    /// Set once the program has exited or faulted without a handler.
    pub halted: bool,
    /// Exit status supplied by `exit`/`exit2`.
    pub exit_code: Option<i32>,
    /// Whether branches and jumps execute a delay slot.
    pub delayed_branches: bool,
    /// Emit a `trace` event for every executed instruction.
    pub trace: bool,
    /// Number of instructions completed.
    pub instructions_retired: u64,
    /// The instruction at `pc` is the delay slot of the previous one.
    in_delay_slot: bool,
    /// Branch left pending by a trap taken in a delay slot.
    slot_resume: Option<SlotResume>,
}

impl Cpu {
    /// Creates a CPU in its reset state.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            npc: 0,
            cp0: Cp0::default(),
            halted: false,
            exit_code: None,
            delayed_branches: config.system.delayed_branches,
            trace: config.general.trace_instructions,
            instructions_retired: 0,
            in_delay_slot: false,
            slot_resume: None,
        }
    }

    /// Redirects execution to `pc`, discarding any pending delay slot.
    pub const fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
        self.npc = pc.wrapping_add(4);
        self.in_delay_slot = false;
    }

    /// Whether the instruction at `pc` executes in a branch delay slot.
    pub const fn in_delay_slot(&self) -> bool {
        self.in_delay_slot
    }

    /// The seven special registers in display order: PC, EPC, Cause, BadVAddr, Status, HI, LO.
    pub const fn special_registers(&self) -> [(&'static str, u32); 7] {
        [
            ("PC", self.pc),
            ("EPC", self.cp0.epc),
            ("Cause", self.cp0.cause),
            ("BadVAddr", self.cp0.bad_vaddr),
            ("Status", self.cp0.status),
            ("HI", self.regs.hi),
            ("LO", self.regs.lo),
        ]
    }
}
