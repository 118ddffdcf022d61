//! Trap and Setup Error definitions.
//!
//! This module defines the error handling and trap mechanisms for the simulator. It provides:
//! 1. **Trap Representation:** The in-band MIPS exceptions raised while stepping.
//! 2. **Setup Errors:** `SimError`, the failures that abort initialization.
//! 3. **Error Handling:** Integrating with standard Rust error traits for host-level reporting.

use std::fmt;
use std::path::PathBuf;

use super::data::AccessType;

/// MIPS exception codes as written into the `ExcCode` field of CP0 Cause.
pub mod exc_code {
    /// Address error on load or instruction fetch (AdEL).
    pub const ADDRESS_ERROR_LOAD: u32 = 4;
    /// Address error on store (AdES).
    pub const ADDRESS_ERROR_STORE: u32 = 5;
    /// Bus error on instruction fetch (IBE).
    pub const BUS_ERROR_FETCH: u32 = 6;
    /// Syscall exception (Sys).
    pub const SYSCALL: u32 = 8;
    /// Breakpoint exception (Bp).
    pub const BREAKPOINT: u32 = 9;
    /// Reserved instruction exception (RI).
    pub const RESERVED_INSTRUCTION: u32 = 10;
    /// Arithmetic overflow exception (Ov).
    pub const OVERFLOW: u32 = 12;
}

/// In-band exceptions raised by the executor while stepping.
///
/// Traps never escape a step as Rust errors: the executor records them in CP0
/// and either vectors into the kernel exception handler or halts the program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Misaligned or unmapped load or fetch.
    ///
    /// The associated value is the faulting address.
    AddressErrorLoad(u32),

    /// Misaligned or unmapped store.
    ///
    /// The associated value is the faulting address.
    AddressErrorStore(u32),

    /// Instruction fetch from outside the text segments.
    ///
    /// The associated value is the faulting program counter.
    BusErrorFetch(u32),

    /// A `syscall` instruction that the simulator could not service.
    Syscall,

    /// A `break` instruction was executed.
    ///
    /// The associated value is the program counter of the instruction.
    Breakpoint(u32),

    /// The word could not be decoded as an instruction.
    ///
    /// The associated value is the instruction encoding.
    ReservedInstruction(u32),

    /// Signed overflow in `add`, `addi` or `sub`.
    Overflow,
}

impl Trap {
    /// Builds the address-error trap matching an access kind.
    pub const fn for_access(access: AccessType, addr: u32) -> Self {
        match access {
            AccessType::Fetch => Self::BusErrorFetch(addr),
            AccessType::Load => Self::AddressErrorLoad(addr),
            AccessType::Store => Self::AddressErrorStore(addr),
        }
    }

    /// Returns the CP0 `ExcCode` for this trap.
    pub const fn code(&self) -> u32 {
        match self {
            Self::AddressErrorLoad(_) => exc_code::ADDRESS_ERROR_LOAD,
            Self::AddressErrorStore(_) => exc_code::ADDRESS_ERROR_STORE,
            Self::BusErrorFetch(_) => exc_code::BUS_ERROR_FETCH,
            Self::Syscall => exc_code::SYSCALL,
            Self::Breakpoint(_) => exc_code::BREAKPOINT,
            Self::ReservedInstruction(_) => exc_code::RESERVED_INSTRUCTION,
            Self::Overflow => exc_code::OVERFLOW,
        }
    }

    /// Returns the address to latch into CP0 BadVAddr, if the trap carries one.
    pub const fn bad_vaddr(&self) -> Option<u32> {
        match self {
            Self::AddressErrorLoad(addr)
            | Self::AddressErrorStore(addr)
            | Self::BusErrorFetch(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Short description in the wording of the SPIM exception handler.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AddressErrorLoad(_) => "Address error in inst/data fetch",
            Self::AddressErrorStore(_) => "Address error in store",
            Self::BusErrorFetch(_) => "Bad instruction address",
            Self::Syscall => "Error in syscall",
            Self::Breakpoint(_) => "Breakpoint",
            Self::ReservedInstruction(_) => "Reserved instruction",
            Self::Overflow => "Arithmetic overflow",
        }
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressErrorLoad(addr) => write!(f, "AddressErrorLoad({addr:#010x})"),
            Self::AddressErrorStore(addr) => write!(f, "AddressErrorStore({addr:#010x})"),
            Self::BusErrorFetch(addr) => write!(f, "BusErrorFetch({addr:#010x})"),
            Self::Syscall => write!(f, "Syscall"),
            Self::Breakpoint(pc) => write!(f, "Breakpoint({pc:#010x})"),
            Self::ReservedInstruction(inst) => write!(f, "ReservedInstruction({inst:#010x})"),
            Self::Overflow => write!(f, "Overflow"),
        }
    }
}

impl std::error::Error for Trap {}

/// Failures that prevent a simulator from being set up.
///
/// These are the unrecoverable faults of the machine: hosts escalate them
/// with [`fatal_error`](crate::sim::report::fatal_error).
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A program, handler or configuration file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The image is not a parseable ELF file.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// The image parsed but cannot run on this machine.
    #[error("unsupported program image: {0}")]
    UnsupportedImage(String),

    /// A loaded section falls outside every segment or beyond its limit.
    #[error("{segment} segment cannot hold address {addr:#010x}")]
    SegmentOverflow {
        /// Name of the segment the address was routed to.
        segment: &'static str,
        /// First address that did not fit.
        addr: u32,
    },

    /// The configuration JSON is malformed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configured exception handler image is missing or unreadable.
    #[error("exception handler '{}' could not be loaded", .0.display())]
    MissingExceptionHandler(PathBuf),
}
