//! Segment Map.
//!
//! This module classifies 32-bit addresses into the named segments of the SPIM
//! memory layout. It provides the following:
//! 1. **Routing:** Deciding which region a loaded section or an access belongs to.
//! 2. **Naming:** Stable segment names for diagnostics and error messages.
//! 3. **Bounds:** The highest address each segment may reach.

use super::constants::{
    DATA_BOT, K_DATA_BOT, K_TEXT_BOT, MM_IO_BOT, MM_IO_TOP, STACK_TOP, TEXT_BOT,
};

/// A named segment of the simulated address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// User instructions, `[TEXT_BOT, DATA_BOT)`.
    Text,
    /// User static data and heap growing upward from `DATA_BOT`, and the
    /// stack growing down to meet it from `STACK_TOP`.
    ///
    /// Which of the two owns an address is decided by the live region bounds.
    Data,
    /// Kernel instructions, `[K_TEXT_BOT, K_DATA_BOT)`.
    KernelText,
    /// Kernel data, `[K_DATA_BOT, MM_IO_BOT)`.
    KernelData,
    /// Memory-mapped console registers.
    MappedIo,
}

impl Segment {
    /// Returns the segment an address falls in, before taking live region bounds into account.
    ///
    /// Addresses below `TEXT_BOT` belong to no segment.
    pub const fn classify(addr: u32) -> Option<Self> {
        if addr < TEXT_BOT {
            None
        } else if addr < DATA_BOT {
            Some(Self::Text)
        } else if addr < K_TEXT_BOT {
            Some(Self::Data)
        } else if addr < K_DATA_BOT {
            Some(Self::KernelText)
        } else if addr < MM_IO_BOT {
            Some(Self::KernelData)
        } else if addr < MM_IO_TOP {
            Some(Self::MappedIo)
        } else {
            None
        }
    }

    /// Returns a short lowercase name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Data => "data",
            Self::KernelText => "kernel text",
            Self::KernelData => "kernel data",
            Self::MappedIo => "memory-mapped I/O",
        }
    }

    /// Exclusive upper bound of the addresses the segment may span.
    pub const fn limit(self) -> u32 {
        match self {
            Self::Text => DATA_BOT,
            Self::Data => STACK_TOP,
            Self::KernelText => K_DATA_BOT,
            Self::KernelData => MM_IO_BOT,
            Self::MappedIo => MM_IO_TOP,
        }
    }
}
