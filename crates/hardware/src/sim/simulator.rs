//! Simulator: owns the CPU, the system and the inspection state side-by-side.
//!
//! A `Simulator` is the whole simulated world for one program. It is created
//! once by loading a program and an exception handler, then driven with
//! [`Simulator::step`] and observed through the snapshot accessors.

use std::fmt;

use tracing::info;

use crate::common::constants::{GP_INITIAL, STACK_TOP};
use crate::common::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::inspect::{DiffEntry, StateSnapshotter, render_html, render_listing};
use crate::isa::abi::{REG_A0, REG_A1, REG_A2, REG_GP, REG_SP};
use crate::sim::breakpoints::BreakpointSet;
use crate::sim::executor::{Executor, Mips32Executor};
use crate::sim::loader::{ElfLoader, Loader, ProgramImage, default_exception_handler};
use crate::sim::report::Reporter;
use crate::soc::System;
use crate::soc::devices::Console;

/// Words reserved at the top of the stack for `argc` and the argv/envp terminators.
const RUN_STACK_WORDS: u32 = 4;

/// The simulated world: machine state, breakpoints and inspection shadows.
pub struct Simulator {
    pub(super) config: Config,
    pub(super) cpu: Cpu,
    pub(super) bus: System,
    pub(super) breakpoints: BreakpointSet,
    pub(super) executor: Box<dyn Executor>,
    pub(super) reporter: Box<dyn Reporter>,
    pub(super) completed: bool,
    snapshotter: StateSnapshotter,
    entry: u32,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cpu", &self.cpu)
            .field("bus", &self.bus)
            .field("breakpoints", &self.breakpoints)
            .field("entry", &format_args!("{:#010x}", self.entry))
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a simulator for the program at `config.general.program`.
    ///
    /// # Arguments
    ///
    /// * `config` - Machine configuration.
    /// * `loader` - Reads the program and any configured exception handler.
    /// * `console` - Character stream for program I/O.
    /// * `reporter` - Sink for diagnostics raised while running.
    ///
    /// # Returns
    ///
    /// The initialized world, or the setup failure. Hosts escalate failures with
    /// [`fatal_error`](crate::sim::report::fatal_error).
    pub fn initialize(
        config: Config,
        loader: &dyn Loader,
        console: Console,
        reporter: Box<dyn Reporter>,
    ) -> Result<Self, SimError> {
        let program = loader.load(&config.general.program)?;
        let handler = Self::exception_handler(&config, loader, &program)?;
        Self::build(config, &program, &handler, console, reporter)
    }

    /// Creates a simulator from an image already in memory.
    ///
    /// A configured exception handler is still read from disk as an ELF file.
    pub fn from_image(
        config: Config,
        image: &ProgramImage,
        console: Console,
        reporter: Box<dyn Reporter>,
    ) -> Result<Self, SimError> {
        let handler = Self::exception_handler(&config, &ElfLoader, image)?;
        Self::build(config, image, &handler, console, reporter)
    }

    fn exception_handler(
        config: &Config,
        loader: &dyn Loader,
        program: &ProgramImage,
    ) -> Result<ProgramImage, SimError> {
        match &config.system.exception_handler {
            None => Ok(default_exception_handler(program.endian())),
            Some(path) => loader.load(path).map_err(|err| match err {
                SimError::Io { .. } => SimError::MissingExceptionHandler(path.clone()),
                other => other,
            }),
        }
    }

    fn build(
        config: Config,
        program: &ProgramImage,
        handler: &ProgramImage,
        console: Console,
        reporter: Box<dyn Reporter>,
    ) -> Result<Self, SimError> {
        let mut bus = System::new(&config, console);
        bus.memory.set_endian(program.endian());
        handler.load_into(&mut bus)?;
        program.load_into(&mut bus)?;

        let mut cpu = Cpu::new(&config);
        Self::initialize_run_stack(&mut cpu, &mut bus)?;

        info!(
            entry = format_args!("{:#010x}", program.entry()),
            segments = program.segments().len(),
            "program loaded"
        );

        Ok(Self {
            config,
            cpu,
            bus,
            breakpoints: BreakpointSet::new(),
            executor: Box::new(Mips32Executor),
            reporter,
            completed: false,
            snapshotter: StateSnapshotter::new(),
            entry: program.entry(),
        })
    }

    /// Lays out an empty argument vector: `argc = 0` at `$sp`, followed by
    /// the NULL terminators of argv and envp.
    fn initialize_run_stack(cpu: &mut Cpu, bus: &mut System) -> Result<(), SimError> {
        let sp = STACK_TOP - RUN_STACK_WORDS * 4;
        let argv = sp + 4;
        let envp = sp + 8;
        for addr in [sp, argv, envp] {
            bus.memory
                .write_word(addr, 0)
                .map_err(|_| SimError::SegmentOverflow {
                    segment: "stack",
                    addr,
                })?;
        }
        cpu.regs.write(REG_SP, sp);
        cpu.regs.write(REG_GP, GP_INITIAL);
        cpu.regs.write(REG_A0, 0);
        cpu.regs.write(REG_A1, argv);
        cpu.regs.write(REG_A2, envp);
        Ok(())
    }

    /// Replaces the instruction executor.
    pub fn set_executor(&mut self, executor: Box<dyn Executor>) {
        self.executor = executor;
    }

    /// Address execution starts from when PC is unset.
    pub const fn starting_address(&self) -> u32 {
        self.entry
    }

    /// Current program counter; 0 before the first step.
    pub const fn get_pc(&self) -> u32 {
        self.cpu.pc
    }

    /// The configuration the world was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Architectural state.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Memory and console.
    pub const fn system(&self) -> &System {
        &self.bus
    }

    /// The console the program talks to.
    pub const fn console_mut(&mut self) -> &mut Console {
        &mut self.bus.console
    }

    /// Exit status, once the program has exited through a syscall.
    pub const fn exit_code(&self) -> Option<i32> {
        self.cpu.exit_code
    }

    /// Listing of the kernel text segment.
    pub fn get_kernel_text(&self) -> String {
        render_listing(self.bus.memory.kernel_text())
    }

    /// Listing of the user text segment.
    pub fn get_user_text(&self) -> String {
        render_listing(self.bus.memory.text())
    }

    /// Non-zero kernel data words as HTML.
    pub fn get_kernel_data(&mut self) -> String {
        render_html(&self.snapshotter.render_kernel_data(&self.bus.memory))
    }

    /// Non-zero user data words as HTML, changed words highlighted when `compute_diff`.
    pub fn get_user_data(&mut self, compute_diff: bool) -> String {
        render_html(&self.snapshot_data(compute_diff))
    }

    /// Live stack words as HTML.
    pub fn get_user_stack(&mut self, compute_diff: bool) -> String {
        render_html(&self.snapshot_stack(compute_diff))
    }

    /// General registers as HTML.
    pub fn get_general_registers(&mut self, compute_diff: bool) -> String {
        render_html(&self.snapshot_general_registers(compute_diff))
    }

    /// Special registers as HTML.
    pub fn get_special_registers(&mut self, compute_diff: bool) -> String {
        render_html(&self.snapshot_special_registers(compute_diff))
    }

    /// Non-zero user data words.
    pub fn snapshot_data(&mut self, compute_diff: bool) -> Vec<DiffEntry> {
        self.snapshotter.render_data(&self.bus.memory, compute_diff)
    }

    /// Live stack words, from `$sp` up to the top of the stack.
    pub fn snapshot_stack(&mut self, compute_diff: bool) -> Vec<DiffEntry> {
        let sp = self.cpu.regs.read(REG_SP);
        self.snapshotter.render_stack(&self.bus.memory, sp, compute_diff)
    }

    /// The 32 general registers.
    pub fn snapshot_general_registers(&mut self, compute_diff: bool) -> Vec<DiffEntry> {
        let regs = self.cpu.regs.snapshot();
        self.snapshotter.render_general(&regs, compute_diff)
    }

    /// PC, EPC, Cause, BadVAddr, Status, HI and LO.
    pub fn snapshot_special_registers(&mut self, compute_diff: bool) -> Vec<DiffEntry> {
        let specials = self.cpu.special_registers();
        self.snapshotter.render_special(&specials, compute_diff)
    }
}
