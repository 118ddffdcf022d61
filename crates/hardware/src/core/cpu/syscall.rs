//! System-call service.
//!
//! SPIM services `syscall` directly instead of trapping to a kernel. The
//! service number is taken from `$v0`, arguments from `$a0`/`$a1`, and
//! results are returned in `$v0`.

use tracing::debug;

use super::Cpu;
use crate::common::Trap;
use crate::isa::abi::{REG_A0, REG_A1, REG_V0};
use crate::report_run_error;
use crate::sim::report::Reporter;
use crate::soc::System;

/// Print the signed integer in `$a0`.
pub const PRINT_INT: u32 = 1;
/// Print the NUL-terminated string at `$a0`.
pub const PRINT_STRING: u32 = 4;
/// Read a line and return its leading integer in `$v0`.
pub const READ_INT: u32 = 5;
/// Read a line into the buffer at `$a0` of size `$a1`.
pub const READ_STRING: u32 = 8;
/// Grow the data segment by `$a0` bytes; the old break is returned in `$v0`.
pub const SBRK: u32 = 9;
/// Terminate with status 0.
pub const EXIT: u32 = 10;
/// Print the character in `$a0`.
pub const PRINT_CHAR: u32 = 11;
/// Read one character into `$v0`.
pub const READ_CHAR: u32 = 12;
/// Terminate with the status in `$a0`.
pub const EXIT2: u32 = 17;

/// Size of the line buffer used by `read_int`.
const INT_LINE_SIZE: usize = 256;

/// Parses the leading decimal integer of `text`, the way C `atoi` does.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Text without digits yields 0, and overflow wraps.
pub fn parse_leading_int(text: &[u8]) -> i32 {
    let mut rest = text.iter().skip_while(|b| b.is_ascii_whitespace()).peekable();
    let negative = match rest.peek() {
        Some(b'-') => {
            let _ = rest.next();
            true
        }
        Some(b'+') => {
            let _ = rest.next();
            false
        }
        _ => false,
    };
    let magnitude = rest
        .take_while(|b| b.is_ascii_digit())
        .fold(0i32, |acc, b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')));
    if negative { magnitude.wrapping_neg() } else { magnitude }
}

impl Cpu {
    /// Services the system call selected by `$v0`.
    ///
    /// Unknown service numbers are reported as run errors and otherwise ignored.
    /// Faults while copying a string into memory are returned as traps.
    pub(crate) fn syscall(
        &mut self,
        bus: &mut System,
        reporter: &mut dyn Reporter,
    ) -> Result<(), Trap> {
        let number = self.regs.read(REG_V0);
        let a0 = self.regs.read(REG_A0);
        debug!(number, a0 = format_args!("{a0:#010x}"), "syscall");

        match number {
            PRINT_INT => bus.console.write_str(&(a0 as i32).to_string()),
            PRINT_STRING => {
                let bytes = bus.read_c_string(a0);
                bus.console.write_bytes(&bytes);
            }
            READ_INT => {
                let mut line = [0u8; INT_LINE_SIZE];
                let len = bus.console.read_line(&mut line);
                self.regs.write(REG_V0, parse_leading_int(&line[..len]) as u32);
            }
            READ_STRING => {
                let size = self.regs.read(REG_A1) as i32;
                if size > 0 {
                    // Never buffer more than the destination region can hold.
                    let room = bus.memory.room_above(a0).max(1);
                    let mut line = vec![0u8; size.unsigned_abs().min(room) as usize];
                    let len = bus.console.read_line(&mut line);
                    let copied = (len + 1).min(line.len());
                    for (addr, &byte) in (a0..).zip(&line[..copied]) {
                        bus.store_byte(addr, byte)?;
                    }
                }
            }
            SBRK => {
                let old_top = bus.memory.data().top();
                if bus.memory.sbrk(a0 as i32).is_none() {
                    report_run_error!(
                        reporter,
                        "Can't expand data segment by {} bytes to {} bytes",
                        a0 as i32,
                        i64::from(old_top - bus.memory.data().bot()) + i64::from(a0 as i32)
                    );
                }
                self.regs.write(REG_V0, old_top);
            }
            EXIT => {
                self.exit_code = Some(0);
                self.halted = true;
            }
            PRINT_CHAR => bus.console.write_char(a0 as u8),
            READ_CHAR => {
                let byte = bus.console.read_char();
                self.regs.write(REG_V0, u32::from(byte));
            }
            EXIT2 => {
                self.exit_code = Some(a0 as i32);
                self.halted = true;
            }
            _ => report_run_error!(reporter, "Unknown system call: {number}"),
        }
        Ok(())
    }
}
