//! Program Images and Loading.
//!
//! This module turns programs into in-memory images and places them in the
//! simulated address space. It provides:
//! 1. **Images:** `ProgramImage`, a list of byte segments plus an entry point,
//!    buildable by hand for hosts without a filesystem.
//! 2. **Loader Trait:** The seam through which the simulator obtains images.
//! 3. **ELF Loading:** `ElfLoader`, which reads the `PT_LOAD` segments of a
//!    32-bit MIPS ELF executable.
//! 4. **Exception Handler:** The built-in kernel handler installed when none is configured.

use std::fs;
use std::path::Path;

use object::read::elf::ElfFile32;
use object::{Architecture, Endianness, Object, ObjectSegment};
use tracing::debug;

use crate::common::SimError;
use crate::common::constants::EXCEPTION_VECTOR;
use crate::isa::opcodes::ERET;
use crate::soc::System;
use crate::soc::memory::Endian;

/// A run of bytes to be placed at a fixed address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSegment {
    /// Load address of the first byte.
    pub addr: u32,
    /// Initialized contents.
    pub bytes: Vec<u8>,
    /// Zero bytes that follow `bytes` in memory.
    pub zero_fill: u32,
}

/// A loadable program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramImage {
    entry: u32,
    endian: Endian,
    segments: Vec<ImageSegment>,
}

impl ProgramImage {
    /// Creates an empty little-endian image that starts executing at `entry`.
    pub const fn new(entry: u32) -> Self {
        Self {
            entry,
            endian: Endian::Little,
            segments: Vec::new(),
        }
    }

    /// Sets the byte order of the image.
    #[must_use]
    pub const fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Appends raw bytes at `addr`.
    #[must_use]
    pub fn with_segment(mut self, addr: u32, bytes: impl Into<Vec<u8>>) -> Self {
        self.with_padded_segment(addr, bytes, 0)
    }

    /// Appends raw bytes at `addr` followed by `zero_fill` zero bytes.
    #[must_use]
    pub fn with_padded_segment(
        mut self,
        addr: u32,
        bytes: impl Into<Vec<u8>>,
        zero_fill: u32,
    ) -> Self {
        self.segments.push(ImageSegment {
            addr,
            bytes: bytes.into(),
            zero_fill,
        });
        self
    }

    /// Appends words at `addr`, encoded in the image's byte order.
    #[must_use]
    pub fn with_words(self, addr: u32, words: &[u32]) -> Self {
        let bytes: Vec<u8> = match self.endian {
            Endian::Little => words.iter().flat_map(|w| w.to_le_bytes()).collect(),
            Endian::Big => words.iter().flat_map(|w| w.to_be_bytes()).collect(),
        };
        self.with_segment(addr, bytes)
    }

    /// Address of the first instruction.
    pub const fn entry(&self) -> u32 {
        self.entry
    }

    /// Byte order of the image.
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Segments in the order they will be loaded.
    pub fn segments(&self) -> &[ImageSegment] {
        &self.segments
    }

    /// Copies every segment into `bus` memory.
    pub fn load_into(&self, bus: &mut System) -> Result<(), SimError> {
        for segment in &self.segments {
            bus.load_segment(segment.addr, &segment.bytes, segment.zero_fill)?;
        }
        Ok(())
    }
}

/// The kernel handler installed when no handler image is configured.
///
/// It skips the faulting instruction and returns:
///
/// ```text
/// 0x80000180  mfc0  $k0, $14
///             addiu $k0, $k0, 4
///             mtc0  $k0, $14
///             eret
/// ```
pub fn default_exception_handler(endian: Endian) -> ProgramImage {
    const MFC0_K0_EPC: u32 = 0x401a_7000;
    const ADDIU_K0_4: u32 = 0x275a_0004;
    const MTC0_K0_EPC: u32 = 0x409a_7000;

    ProgramImage::new(EXCEPTION_VECTOR)
        .with_endian(endian)
        .with_words(EXCEPTION_VECTOR, &[MFC0_K0_EPC, ADDIU_K0_4, MTC0_K0_EPC, ERET])
}

/// Source of program images.
pub trait Loader {
    /// Parses an image from its file contents.
    fn parse(&self, bytes: &[u8]) -> Result<ProgramImage, SimError>;

    /// Reads and parses the image at `path`.
    fn load(&self, path: &Path) -> Result<ProgramImage, SimError> {
        let bytes = fs::read(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&bytes)
    }
}

/// Loader for 32-bit MIPS ELF executables.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElfLoader;

impl Loader for ElfLoader {
    fn parse(&self, bytes: &[u8]) -> Result<ProgramImage, SimError> {
        let elf = ElfFile32::<Endianness>::parse(bytes)?;
        if elf.architecture() != Architecture::Mips {
            return Err(SimError::UnsupportedImage(format!(
                "expected a MIPS executable, found {:?}",
                elf.architecture()
            )));
        }
        let endian = if elf.is_little_endian() {
            Endian::Little
        } else {
            Endian::Big
        };
        let entry = u32::try_from(elf.entry())
            .map_err(|_| SimError::UnsupportedImage("entry point above 4 GiB".into()))?;

        let mut image = ProgramImage::new(entry).with_endian(endian);
        for segment in elf.segments() {
            let mem_size = u32::try_from(segment.size())
                .map_err(|_| SimError::UnsupportedImage("segment too large".into()))?;
            if mem_size == 0 {
                continue;
            }
            let addr = u32::try_from(segment.address())
                .map_err(|_| SimError::UnsupportedImage("segment above 4 GiB".into()))?;
            let bytes = segment.data()?;
            let file_size = u32::try_from(bytes.len())
                .map_err(|_| SimError::UnsupportedImage("segment too large".into()))?;
            let zero_fill = mem_size.saturating_sub(file_size);
            debug!(
                addr = format_args!("{addr:#010x}"),
                len = bytes.len(),
                zero_fill,
                "ELF segment"
            );
            image = image.with_padded_segment(addr, bytes, zero_fill);
        }
        Ok(image)
    }
}
