//! Simulated Main Memory.
//!
//! This module implements the segmented address space of the SPIM machine. It provides:
//! 1. **Regions:** Word storage for user text, data, stack, kernel text and kernel data.
//! 2. **Access:** Byte, half and word loads and stores with alignment checks and
//!    image-selected byte order.
//! 3. **Growth:** `sbrk` for the data segment and automatic downward growth of the stack.
//! 4. **Loading:** Routing of program image segments to the region that owns them.

/// Word-granular region storage.
pub mod region;

pub use region::Region;

use std::iter;

use tracing::{debug, trace};

use crate::common::constants::{
    BYTES_PER_WORD, DATA_BOT, K_DATA_BOT, K_TEXT_BOT, STACK_TOP, TEXT_BOT, round_down_word,
    round_up_word,
};
use crate::common::{AccessType, Segment, SimError, Trap};
use crate::config::MemoryConfig;

/// Byte order of multi-byte values within a word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    /// Least significant byte at the lowest address.
    #[default]
    Little,
    /// Most significant byte at the lowest address.
    Big,
}

impl Endian {
    /// Bit shift of the byte at `addr` within its word.
    const fn byte_shift(self, addr: u32) -> u32 {
        match self {
            Self::Little => 8 * (addr & 3),
            Self::Big => 8 * (3 - (addr & 3)),
        }
    }

    /// Bit shift of the halfword at `addr` (which must be 2-aligned) within its word.
    const fn half_shift(self, addr: u32) -> u32 {
        match self {
            Self::Little => 8 * (addr & 2),
            Self::Big => 8 * (2 - (addr & 2)),
        }
    }
}

/// The simulated address space.
#[derive(Clone, Debug)]
pub struct Memory {
    endian: Endian,
    text: Region,
    data: Region,
    stack: Region,
    k_text: Region,
    k_data: Region,
    data_limit: u32,
    stack_limit: u32,
}

impl Memory {
    /// Creates the address space with the initial segment sizes from `config`.
    ///
    /// Text segments start empty and take their base from the first loaded section.
    pub fn new(config: &MemoryConfig) -> Self {
        let stack_size = config.stack_size.min(config.stack_limit);
        Self {
            endian: Endian::Little,
            text: Region::empty(TEXT_BOT),
            data: Region::new(DATA_BOT, config.data_size),
            stack: Region::new(STACK_TOP - round_down_word(stack_size), stack_size),
            k_text: Region::empty(K_TEXT_BOT),
            k_data: Region::new(K_DATA_BOT, config.kernel_data_size),
            data_limit: config.data_limit.max(config.data_size),
            stack_limit: config.stack_limit,
        }
    }

    /// Byte order used for sub-word accesses.
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Selects the byte order; called once when the program image is loaded.
    pub const fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// User text region.
    pub const fn text(&self) -> &Region {
        &self.text
    }

    /// User data region.
    pub const fn data(&self) -> &Region {
        &self.data
    }

    /// User stack region.
    pub const fn stack(&self) -> &Region {
        &self.stack
    }

    /// Kernel text region.
    pub const fn kernel_text(&self) -> &Region {
        &self.k_text
    }

    /// Kernel data region.
    pub const fn kernel_data(&self) -> &Region {
        &self.k_data
    }

    /// Maximum size in bytes the stack may grow to.
    pub const fn stack_limit(&self) -> u32 {
        self.stack_limit
    }

    /// Lowest address the stack may grow down to.
    pub const fn stack_floor(&self) -> u32 {
        STACK_TOP.saturating_sub(self.stack_limit)
    }

    fn regions(&self) -> [&Region; 5] {
        [&self.text, &self.data, &self.stack, &self.k_text, &self.k_data]
    }

    fn region_mut(&mut self, addr: u32) -> Option<&mut Region> {
        [
            &mut self.text,
            &mut self.data,
            &mut self.stack,
            &mut self.k_text,
            &mut self.k_data,
        ]
        .into_iter()
        .find(|r| r.contains(addr))
    }

    /// Bytes from `addr` to the top of the region holding it; zero when unmapped.
    pub fn room_above(&self, addr: u32) -> u32 {
        self.regions()
            .into_iter()
            .find(|r| r.contains(addr))
            .map_or(0, |r| r.top() - addr)
    }

    /// Reads the word containing `addr` without raising a trap.
    ///
    /// Unmapped addresses read as `None`.
    pub fn peek_word(&self, addr: u32) -> Option<u32> {
        self.regions().into_iter().find_map(|r| r.read_word(addr))
    }

    fn word(&self, addr: u32, access: AccessType, fault: u32) -> Result<u32, Trap> {
        self.peek_word(addr)
            .ok_or_else(|| Trap::for_access(access, fault))
    }

    /// Fetches the instruction word at `addr`.
    ///
    /// Only the user and kernel text regions are executable.
    pub fn fetch(&self, addr: u32) -> Result<u32, Trap> {
        if addr % BYTES_PER_WORD != 0 {
            return Err(Trap::AddressErrorLoad(addr));
        }
        [&self.text, &self.k_text]
            .into_iter()
            .find_map(|r| r.read_word(addr))
            .ok_or_else(|| Trap::for_access(AccessType::Fetch, addr))
    }

    /// Loads an aligned word.
    pub fn read_word(&self, addr: u32) -> Result<u32, Trap> {
        if addr % BYTES_PER_WORD != 0 {
            return Err(Trap::AddressErrorLoad(addr));
        }
        self.word(addr, AccessType::Load, addr)
    }

    /// Loads an aligned halfword, zero-extended.
    pub fn read_half(&self, addr: u32) -> Result<u16, Trap> {
        if addr % 2 != 0 {
            return Err(Trap::AddressErrorLoad(addr));
        }
        let word = self.word(round_down_word(addr), AccessType::Load, addr)?;
        Ok((word >> self.endian.half_shift(addr)) as u16)
    }

    /// Loads a byte.
    pub fn read_byte(&self, addr: u32) -> Result<u8, Trap> {
        let word = self.word(round_down_word(addr), AccessType::Load, addr)?;
        Ok((word >> self.endian.byte_shift(addr)) as u8)
    }

    /// Stores an aligned word.
    pub fn write_word(&mut self, addr: u32, val: u32) -> Result<(), Trap> {
        if addr % BYTES_PER_WORD != 0 {
            return Err(Trap::AddressErrorStore(addr));
        }
        self.store(addr, addr, |_| val)
    }

    /// Stores an aligned halfword.
    pub fn write_half(&mut self, addr: u32, val: u16) -> Result<(), Trap> {
        if addr % 2 != 0 {
            return Err(Trap::AddressErrorStore(addr));
        }
        let shift = self.endian.half_shift(addr);
        self.store(round_down_word(addr), addr, |w| {
            (w & !(0xffff << shift)) | (u32::from(val) << shift)
        })
    }

    /// Stores a byte.
    pub fn write_byte(&mut self, addr: u32, val: u8) -> Result<(), Trap> {
        let shift = self.endian.byte_shift(addr);
        self.store(round_down_word(addr), addr, |w| {
            (w & !(0xff << shift)) | (u32::from(val) << shift)
        })
    }

    /// Read-modify-writes the word at `aligned`, growing the stack if the
    /// address lies in the unclaimed space just below it.
    fn store(&mut self, aligned: u32, fault: u32, merge: impl FnOnce(u32) -> u32) -> Result<(), Trap> {
        let mapped = self.peek_word(aligned).is_some();
        if !mapped && !self.try_grow_stack(aligned) {
            return Err(Trap::AddressErrorStore(fault));
        }
        let region = self
            .region_mut(aligned)
            .ok_or(Trap::AddressErrorStore(fault))?;
        let old = region.read_word(aligned).unwrap_or(0);
        let _ = region.write_word(aligned, merge(old));
        Ok(())
    }

    fn try_grow_stack(&mut self, addr: u32) -> bool {
        if addr >= self.stack.bot() || addr < self.stack_floor() || addr < self.data.top() {
            return false;
        }
        debug!(
            from = format_args!("{:#010x}", self.stack.bot()),
            to = format_args!("{addr:#010x}"),
            "stack grows"
        );
        self.stack.grow_down_to(addr);
        true
    }

    /// Grows the data segment by `amount` bytes (rounded up to a word).
    ///
    /// # Returns
    ///
    /// The previous top of the data segment, or `None` if `amount` is negative
    /// or the segment would exceed its limit or run into the stack.
    pub fn sbrk(&mut self, amount: i32) -> Option<u32> {
        let amount = u32::try_from(amount).ok()?;
        let old_top = self.data.top();
        let new_top = old_top.checked_add(round_up_word(amount))?;
        if new_top - DATA_BOT > self.data_limit || new_top > self.stack.bot() {
            return None;
        }
        self.data.grow_to(new_top);
        trace!(
            old = format_args!("{old_top:#010x}"),
            new = format_args!("{new_top:#010x}"),
            "sbrk"
        );
        Some(old_top)
    }

    /// Copies `bytes` into the segment owning `addr`, followed by `zero_fill`
    /// zero bytes, extending upward regions as needed.
    ///
    /// Used by the loader only; bypasses alignment checks and never grows the
    /// stack. The whole extent is checked against the segment bounds before
    /// anything is allocated.
    pub fn load_bytes(
        &mut self,
        addr: u32,
        bytes: &[u8],
        zero_fill: u32,
    ) -> Result<(), SimError> {
        let len = u32::try_from(bytes.len())
            .ok()
            .and_then(|len| len.checked_add(zero_fill))
            .ok_or(SimError::SegmentOverflow {
                segment: "data",
                addr,
            })?;
        if len == 0 {
            return Ok(());
        }
        let segment = Segment::classify(addr).ok_or(SimError::SegmentOverflow {
            segment: "unmapped",
            addr,
        })?;
        let end = addr
            .checked_add(len)
            .filter(|&end| end <= segment.limit())
            .ok_or(SimError::SegmentOverflow {
                segment: segment.name(),
                addr,
            })?;
        let stack_floor = self.stack_floor();
        let data_limit = self.data_limit;
        let region = match segment {
            Segment::Text => &mut self.text,
            Segment::KernelText => &mut self.k_text,
            Segment::Data if end <= stack_floor => {
                if end - DATA_BOT > data_limit {
                    return Err(SimError::SegmentOverflow {
                        segment: "data",
                        addr: end,
                    });
                }
                &mut self.data
            }
            Segment::KernelData => {
                if end - K_DATA_BOT > data_limit {
                    return Err(SimError::SegmentOverflow {
                        segment: "kernel data",
                        addr: end,
                    });
                }
                &mut self.k_data
            }
            Segment::Data | Segment::MappedIo => {
                return Err(SimError::SegmentOverflow {
                    segment: segment.name(),
                    addr,
                });
            }
        };

        region.rebase_if_empty(addr);
        region.grow_down_to(addr);
        region.grow_to(end);

        let endian = self.endian;
        let contents = bytes.iter().copied().chain(iter::repeat_n(0, zero_fill as usize));
        for (byte_addr, byte) in (addr..).zip(contents) {
            let aligned = round_down_word(byte_addr);
            let shift = endian.byte_shift(byte_addr);
            let old = region.read_word(aligned).unwrap_or(0);
            let _ = region.write_word(aligned, (old & !(0xff << shift)) | (u32::from(byte) << shift));
        }
        debug!(
            segment = segment.name(),
            addr = format_args!("{addr:#010x}"),
            len,
            "loaded section"
        );
        Ok(())
    }
}
