//! Configuration system for the MIPS simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline segment sizes, growth limits and run budgets.
//! 2. **Structures:** Hierarchical config for general, memory, and system settings.
//! 3. **Loading:** JSON parsing from a string or a file on disk.
//!
//! Every field is optional in JSON; missing fields take the values in `defaults`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::SimError;
use crate::common::constants::DEFAULT_RUN_STEPS;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden
/// in a JSON configuration.
mod defaults {
    /// Program image loaded when none is given.
    pub const PROGRAM: &str = "input.elf";

    /// Initial size of the user data segment (64 KiB).
    ///
    /// The segment is zero-filled up to this size even if the program's
    /// static data is smaller.
    pub const DATA_SIZE: u32 = 0x1_0000;

    /// Largest size the data segment may reach through `sbrk` (16 MiB).
    pub const DATA_LIMIT: u32 = 16 * 1024 * 1024;

    /// Initial size of the user stack (64 KiB).
    pub const STACK_SIZE: u32 = 0x1_0000;

    /// Largest size the stack may reach by growing downward (1 MiB).
    ///
    /// Also bounds the stack view's shadow buffer.
    pub const STACK_LIMIT: u32 = 1024 * 1024;

    /// Initial size of the kernel data segment (64 KiB).
    pub const KERNEL_DATA_SIZE: u32 = 0x1_0000;
}

/// Top-level simulator configuration.
///
/// # Example
///
/// ```
/// use spim_core::config::Config;
///
/// let json = r#"{
///     "general": { "program": "hello.elf", "quiet": true },
///     "memory": { "stack_limit": 2097152 },
///     "system": { "mapped_io": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.quiet);
/// assert_eq!(config.memory.stack_limit, 2 * 1024 * 1024);
/// assert_eq!(config.memory.data_size, 0x1_0000);
/// assert!(config.system.delayed_branches);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Segment sizes and growth limits
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Machine features: mapped I/O, exception handler, delay slots
    #[serde(default)]
    pub system: SystemConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON document; any subset of fields may be present.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or `SimError::Config` if the text is malformed.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Program image to load.
    #[serde(default = "GeneralConfig::default_program")]
    pub program: PathBuf,

    /// Step budget used when `step` is asked for zero steps.
    #[serde(default = "GeneralConfig::default_run_steps")]
    pub default_run_steps: u32,

    /// Suppress `Error`-severity diagnostics on stderr (they are still traced).
    #[serde(default)]
    pub quiet: bool,

    /// Emit a `trace` event with the disassembly of every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,
}

impl GeneralConfig {
    fn default_program() -> PathBuf {
        PathBuf::from(defaults::PROGRAM)
    }

    const fn default_run_steps() -> u32 {
        DEFAULT_RUN_STEPS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            program: Self::default_program(),
            default_run_steps: DEFAULT_RUN_STEPS,
            quiet: false,
            trace_instructions: false,
        }
    }
}

/// Segment sizes and growth limits, in bytes.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Initial user data segment size.
    #[serde(default = "MemoryConfig::default_data_size")]
    pub data_size: u32,

    /// Maximum user data segment size reachable through `sbrk`; also caps loaded kernel data.
    #[serde(default = "MemoryConfig::default_data_limit")]
    pub data_limit: u32,

    /// Initial user stack size.
    #[serde(default = "MemoryConfig::default_stack_size")]
    pub stack_size: u32,

    /// Maximum user stack size.
    #[serde(default = "MemoryConfig::default_stack_limit")]
    pub stack_limit: u32,

    /// Initial kernel data segment size.
    #[serde(default = "MemoryConfig::default_kernel_data_size")]
    pub kernel_data_size: u32,
}

impl MemoryConfig {
    const fn default_data_size() -> u32 {
        defaults::DATA_SIZE
    }

    const fn default_data_limit() -> u32 {
        defaults::DATA_LIMIT
    }

    const fn default_stack_size() -> u32 {
        defaults::STACK_SIZE
    }

    const fn default_stack_limit() -> u32 {
        defaults::STACK_LIMIT
    }

    const fn default_kernel_data_size() -> u32 {
        defaults::KERNEL_DATA_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_size: defaults::DATA_SIZE,
            data_limit: defaults::DATA_LIMIT,
            stack_size: defaults::STACK_SIZE,
            stack_limit: defaults::STACK_LIMIT,
            kernel_data_size: defaults::KERNEL_DATA_SIZE,
        }
    }
}

/// Machine feature switches.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Map the console registers at `0xffff0000..0xffff0010`.
    #[serde(default)]
    pub mapped_io: bool,

    /// ELF image providing the kernel exception handler.
    ///
    /// When unset, the built-in handler (skip the faulting instruction and
    /// return) is installed.
    #[serde(default)]
    pub exception_handler: Option<PathBuf>,

    /// Execute the instruction after a branch or jump before transferring control.
    #[serde(default = "SystemConfig::default_delayed_branches")]
    pub delayed_branches: bool,
}

impl SystemConfig {
    const fn default_delayed_branches() -> bool {
        true
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mapped_io: false,
            exception_handler: None,
            delayed_branches: true,
        }
    }
}
