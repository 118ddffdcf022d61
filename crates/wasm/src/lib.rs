//! WebAssembly bindings for the SPIM simulator core.
//!
//! Exposes one [`Spim`] object per loaded program. Program output is buffered
//! and drained with [`Spim::take_output`]; input is queued with
//! [`Spim::push_input`]. Diagnostics go to the browser console.

use std::fmt;

use serde::Serialize;
use spim_core::Config;
use spim_core::inspect::DiffEntry;
use spim_core::sim::{ElfLoader, Loader, Reporter, Simulator};
use spim_core::soc::devices::{BufferedDevice, Console};
use wasm_bindgen::prelude::*;

/// Forwards diagnostics to `console.error`.
#[derive(Clone, Copy, Debug, Default)]
struct BrowserReporter;

impl Reporter for BrowserReporter {
    fn error(&mut self, args: fmt::Arguments<'_>) {
        web_sys::console::error_1(&JsValue::from_str(&args.to_string()));
    }

    fn run_error(&mut self, args: fmt::Arguments<'_>) {
        web_sys::console::error_1(&JsValue::from_str(&args.to_string()));
    }
}

/// All views, for hosts that prefer one JSON document per refresh.
#[derive(Serialize)]
struct Views {
    pc: u32,
    data: Vec<DiffEntry>,
    stack: Vec<DiffEntry>,
    general: Vec<DiffEntry>,
    special: Vec<DiffEntry>,
}

/// A simulator instance driven from JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Spim {
    sim: Simulator,
    console: BufferedDevice,
}

#[wasm_bindgen]
impl Spim {
    /// Loads an ELF program from memory.
    ///
    /// `config_json` may hold any subset of the configuration; missing fields
    /// take their defaults.
    pub fn init(program: &[u8], config_json: Option<String>) -> Result<Self, JsError> {
        let config = match config_json {
            Some(json) => Config::from_json(&json)?,
            None => Config::default(),
        };
        let image = ElfLoader.parse(program)?;
        let console = BufferedDevice::new();
        let sim = Simulator::from_image(
            config,
            &image,
            Console::new(Box::new(console.clone())),
            Box::new(BrowserReporter),
        )?;
        Ok(Self { sim, console })
    }

    /// Runs up to `step_size` instructions (0 for the default budget).
    ///
    /// Returns 0 when the program has completed, -1 at a breakpoint and 1 when
    /// the budget ran out.
    pub fn step(&mut self, step_size: u32, continue_after_breakpoint: bool) -> i32 {
        self.sim.step(step_size, continue_after_breakpoint).code()
    }

    /// Current program counter.
    #[wasm_bindgen(js_name = getPC)]
    pub fn get_pc(&self) -> u32 {
        self.sim.get_pc()
    }

    /// Adds a breakpoint.
    #[wasm_bindgen(js_name = addBreakpoint)]
    pub fn add_breakpoint(&mut self, addr: u32) {
        self.sim.add_breakpoint(addr);
    }

    /// Removes a breakpoint.
    #[wasm_bindgen(js_name = deleteBreakpoint)]
    pub fn delete_breakpoint(&mut self, addr: u32) {
        self.sim.delete_breakpoint(addr);
    }

    /// Current breakpoints in ascending order.
    pub fn breakpoints(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(self.sim.breakpoints().as_slice())
    }

    /// Listing of the user text segment.
    #[wasm_bindgen(js_name = getUserText)]
    pub fn get_user_text(&self) -> String {
        self.sim.get_user_text()
    }

    /// Listing of the kernel text segment.
    #[wasm_bindgen(js_name = getKernelText)]
    pub fn get_kernel_text(&self) -> String {
        self.sim.get_kernel_text()
    }

    /// Kernel data as HTML.
    #[wasm_bindgen(js_name = getKernelData)]
    pub fn get_kernel_data(&mut self) -> String {
        self.sim.get_kernel_data()
    }

    /// User data as HTML.
    #[wasm_bindgen(js_name = getUserData)]
    pub fn get_user_data(&mut self, compute_diff: bool) -> String {
        self.sim.get_user_data(compute_diff)
    }

    /// User stack as HTML.
    #[wasm_bindgen(js_name = getUserStack)]
    pub fn get_user_stack(&mut self, compute_diff: bool) -> String {
        self.sim.get_user_stack(compute_diff)
    }

    /// General registers as HTML.
    #[wasm_bindgen(js_name = getGeneralReg)]
    pub fn get_general_registers(&mut self, compute_diff: bool) -> String {
        self.sim.get_general_registers(compute_diff)
    }

    /// Special registers as HTML.
    #[wasm_bindgen(js_name = getSpecialReg)]
    pub fn get_special_registers(&mut self, compute_diff: bool) -> String {
        self.sim.get_special_registers(compute_diff)
    }

    /// Every diff-marked view as one JSON document.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&mut self, compute_diff: bool) -> Result<String, JsError> {
        let views = Views {
            pc: self.sim.get_pc(),
            data: self.sim.snapshot_data(compute_diff),
            stack: self.sim.snapshot_stack(compute_diff),
            general: self.sim.snapshot_general_registers(compute_diff),
            special: self.sim.snapshot_special_registers(compute_diff),
        };
        Ok(serde_json::to_string(&views)?)
    }

    /// Queues text for the program to read.
    #[wasm_bindgen(js_name = pushInput)]
    pub fn push_input(&self, text: &str) {
        self.console.push_input(text.as_bytes());
    }

    /// Drains everything the program has written since the last call.
    #[wasm_bindgen(js_name = takeOutput)]
    pub fn take_output(&self) -> String {
        String::from_utf8_lossy(&self.console.take_output()).into_owned()
    }

    /// Exit status once the program has exited through a syscall.
    #[wasm_bindgen(js_name = exitCode)]
    pub fn exit_code(&self) -> Option<i32> {
        self.sim.exit_code()
    }
}
