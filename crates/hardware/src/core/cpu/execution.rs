//! Instruction Execution.
//!
//! This module implements the execution cycle of the CPU. It performs the following:
//! 1. **Fetch and Decode:** Reads the word at PC from a text segment and decodes it.
//! 2. **Execute:** Applies the instruction to registers, memory or the console.
//! 3. **Control Transfer:** Advances PC, honouring branch delay slots when enabled.
//! 4. **Observability:** Emits a `trace` event per instruction when tracing is on.

use tracing::trace;

use super::{Cpu, memory};
use crate::common::Trap;
use crate::core::units::alu::Alu;
use crate::isa::abi::REG_RA;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble_at;
use crate::isa::instruction::{BranchCond, Instruction};
use crate::sim::report::Reporter;
use crate::soc::System;

/// How control continues after an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    /// Fall through to the next sequential instruction.
    Next,
    /// Transfer to the target after the delay slot (if delay slots are enabled).
    Branch(u32),
    /// Transfer immediately, with no delay slot (`eret`).
    Jump(u32),
}

impl Cpu {
    /// Executes one instruction.
    ///
    /// Traps raised by the instruction are taken through [`Cpu::take_trap`],
    /// which either vectors to the kernel handler or halts the CPU. A halted
    /// CPU ignores further calls.
    ///
    /// # Arguments
    ///
    /// * `bus` - Memory and console.
    /// * `reporter` - Sink for run-time errors.
    pub fn step(&mut self, bus: &mut System, reporter: &mut dyn Reporter) {
        if self.halted {
            return;
        }
        let pc = self.pc;
        let in_slot = self.in_delay_slot;
        self.in_delay_slot = false;
        let word = match bus.memory.fetch(pc) {
            Ok(word) => word,
            Err(trap) => {
                self.fetch_fault(&trap, pc, reporter);
                return;
            }
        };
        let Some(inst) = decode(word) else {
            self.raise(&Trap::ReservedInstruction(word), pc, in_slot, bus, reporter);
            return;
        };
        if self.trace {
            trace!(pc = format_args!("{pc:#010x}"), "{}", disassemble_at(word, pc));
        }

        let mut next = self.npc;
        self.npc = next.wrapping_add(4);

        match self.execute(inst, pc, bus, reporter) {
            Ok(Flow::Next) => {
                self.in_delay_slot = self.delayed_branches && inst.is_control_transfer();
            }
            Ok(Flow::Branch(target)) => {
                self.in_delay_slot = self.delayed_branches;
                if self.delayed_branches {
                    self.npc = target;
                } else {
                    next = target;
                    self.npc = target.wrapping_add(4);
                }
            }
            Ok(Flow::Jump(target)) => {
                next = target;
                self.npc = target.wrapping_add(4);
            }
            Err(trap) => {
                self.npc = next;
                self.raise(&trap, pc, in_slot, bus, reporter);
                return;
            }
        }

        self.instructions_retired += 1;
        if !self.halted {
            self.pc = next;
        }
    }

    /// Return address written by linking branches and jumps.
    const fn link_address(&self, pc: u32) -> u32 {
        if self.delayed_branches {
            pc.wrapping_add(8)
        } else {
            pc.wrapping_add(4)
        }
    }

    fn execute(
        &mut self,
        inst: Instruction,
        pc: u32,
        bus: &mut System,
        reporter: &mut dyn Reporter,
    ) -> Result<Flow, Trap> {
        let r = |cpu: &Self, idx: usize| cpu.regs.read(idx);

        match inst {
            Instruction::Alu { op, rd, rs, rt } => {
                let val = Alu::execute(op, r(self, rs), r(self, rt))?;
                self.regs.write(rd, val);
            }
            Instruction::Shift { op, rd, rt, shamt } => {
                self.regs.write(rd, Alu::shift(op, r(self, rt), shamt));
            }
            Instruction::ShiftVar { op, rd, rt, rs } => {
                self.regs.write(rd, Alu::shift(op, r(self, rt), r(self, rs)));
            }
            Instruction::AluImm { op, rt, rs, imm } => {
                let val = Alu::execute_imm(op, r(self, rs), imm)?;
                self.regs.write(rt, val);
            }
            Instruction::Lui { rt, imm } => self.regs.write(rt, u32::from(imm) << 16),
            Instruction::MulDiv { op, rs, rt } => {
                if let Some((hi, lo)) = Alu::mul_div(op, r(self, rs), r(self, rt)) {
                    self.regs.hi = hi;
                    self.regs.lo = lo;
                }
            }
            Instruction::Mul { rd, rs, rt } => {
                let product = (r(self, rs) as i32).wrapping_mul(r(self, rt) as i32);
                self.regs.write(rd, product as u32);
            }
            Instruction::MoveFrom { hi, rd } => {
                let val = if hi { self.regs.hi } else { self.regs.lo };
                self.regs.write(rd, val);
            }
            Instruction::MoveTo { hi, rs } => {
                let val = r(self, rs);
                if hi {
                    self.regs.hi = val;
                } else {
                    self.regs.lo = val;
                }
            }
            Instruction::Branch { cond, rs, rt, offset } => {
                let a = r(self, rs);
                let b = r(self, rt);
                let taken = match cond {
                    BranchCond::Eq => a == b,
                    BranchCond::Ne => a != b,
                    BranchCond::Lez => (a as i32) <= 0,
                    BranchCond::Gtz => (a as i32) > 0,
                    BranchCond::Ltz | BranchCond::Ltzal => (a as i32) < 0,
                    BranchCond::Gez | BranchCond::Gezal => (a as i32) >= 0,
                };
                if matches!(cond, BranchCond::Ltzal | BranchCond::Gezal) {
                    self.regs.write(REG_RA, self.link_address(pc));
                }
                if taken {
                    let target = pc
                        .wrapping_add(4)
                        .wrapping_add((i32::from(offset) << 2) as u32);
                    return Ok(Flow::Branch(target));
                }
            }
            Instruction::Jump { link, target } => {
                if link {
                    self.regs.write(REG_RA, self.link_address(pc));
                }
                let region = pc.wrapping_add(4) & 0xF000_0000;
                return Ok(Flow::Branch(region | (target << 2)));
            }
            Instruction::JumpReg { link, rs } => {
                let target = r(self, rs);
                if let Some(rd) = link {
                    self.regs.write(rd, self.link_address(pc));
                }
                return Ok(Flow::Branch(target));
            }
            Instruction::Load { width, signed, rt, base, offset } => {
                let addr = r(self, base).wrapping_add(i32::from(offset) as u32);
                let val = memory::load(bus, width, signed, addr)?;
                self.regs.write(rt, val);
            }
            Instruction::Store { width, rt, base, offset } => {
                let addr = r(self, base).wrapping_add(i32::from(offset) as u32);
                memory::store(bus, width, addr, r(self, rt))?;
            }
            Instruction::Mfc0 { rt, rd } => self.regs.write(rt, self.cp0.read(rd)),
            Instruction::Mtc0 { rt, rd } => self.cp0.write(rd, r(self, rt)),
            Instruction::Eret => return Ok(Flow::Jump(self.exception_return())),
            Instruction::Syscall => self.syscall(bus, reporter)?,
            Instruction::Break { .. } => return Err(Trap::Breakpoint(pc)),
        }
        Ok(Flow::Next)
    }
}
