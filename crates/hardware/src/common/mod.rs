//! Common utilities and types used throughout the MIPS simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Segment Map:** Classification of addresses into text, data, stack and kernel segments.
//! 2. **Constants:** Segment bases, word geometry and step budgets.
//! 3. **Memory Access:** Definitions for categorizing memory operations (Fetch/Load/Store).
//! 4. **Error Handling:** In-band traps and setup errors.
//! 5. **Register Management:** A unified interface for GPR and HI/LO access.

/// Segment classification of the address space.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and trap definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::Segment;
pub use constants::{BYTES_PER_WORD, DEFAULT_RUN_STEPS, STACK_TOP};
pub use data::AccessType;
pub use error::{SimError, Trap};
pub use reg::RegisterFile;
