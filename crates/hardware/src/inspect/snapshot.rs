//! Differential state snapshots.
//!
//! Each render compares live state against the shadow recorded by the
//! previous render of the same view, then records the live state. This
//! module implements:
//! 1. **Upward Regions:** Data and kernel data, indexed from the region base.
//!    Zero words are hidden but still recorded.
//! 2. **Stack:** Indexed by distance from `STACK_TOP` so downward growth
//!    never shifts a slot. Words below the previous low-water mark always
//!    count as changed.
//! 3. **Register Sets:** The 32 general registers and the seven special registers.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::common::constants::{BYTES_PER_WORD, STACK_TOP, round_down_word};
use crate::inspect::shadow::WordShadow;
use crate::isa::abi::REG_NAMES;
use crate::soc::memory::{Memory, Region};

/// One rendered word with its previous value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    /// Text shown before the value: `[0x10000000]`, `R2  (v0)` or `Status  `.
    pub label: String,
    /// Address of a memory word; `None` for registers.
    pub address: Option<u32>,
    /// Value at the previous render.
    pub old: u32,
    /// Current value.
    pub value: u32,
    /// Whether the entry is marked as changed.
    pub changed: bool,
}

impl DiffEntry {
    fn memory(addr: u32, old: u32, value: u32, changed: bool) -> Self {
        Self {
            label: format!("[0x{addr:08x}]"),
            address: Some(addr),
            old,
            value,
            changed,
        }
    }

    fn register(label: String, old: u32, value: u32, changed: bool) -> Self {
        Self {
            label,
            address: None,
            old,
            value,
            changed,
        }
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.address.is_some() {
            write!(f, "{} 0x{:08x}", self.label, self.value)
        } else {
            write!(f, "{} = {:08x}", self.label, self.value)
        }
    }
}

/// Shadow state for every inspectable view.
///
/// Shadows are created on the first render of their view and updated by
/// every render, whether or not diffing was requested.
#[derive(Clone, Debug, Default)]
pub struct StateSnapshotter {
    data: Option<WordShadow>,
    kernel_data: Option<WordShadow>,
    stack: Option<WordShadow>,
    stack_low: Option<u32>,
    general: Option<WordShadow>,
    special: Option<WordShadow>,
}

fn render_upward(shadow: &mut WordShadow, region: &Region, compute_diff: bool) -> Vec<DiffEntry> {
    shadow.ensure_len(region.words().len());
    let mut entries = Vec::new();
    for (index, (addr, value)) in region.iter().enumerate() {
        let old = shadow.get(index);
        shadow.set(index, value);
        if value == 0 {
            continue;
        }
        entries.push(DiffEntry::memory(addr, old, value, compute_diff && value != old));
    }
    entries
}

fn render_registers(
    shadow: &mut WordShadow,
    registers: impl IntoIterator<Item = (String, u32)>,
    compute_diff: bool,
) -> Vec<DiffEntry> {
    registers
        .into_iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let old = shadow.get(index);
            shadow.set(index, value);
            DiffEntry::register(label, old, value, compute_diff && value != old)
        })
        .collect()
}

impl StateSnapshotter {
    /// Creates a snapshotter with no shadows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the non-zero words of the user data segment.
    pub fn render_data(&mut self, memory: &Memory, compute_diff: bool) -> Vec<DiffEntry> {
        let shadow = self.data.get_or_insert_with(WordShadow::new);
        let before = shadow.len();
        let entries = render_upward(shadow, memory.data(), compute_diff);
        if shadow.len() != before {
            trace!(from = before, to = shadow.len(), "data shadow resized");
        }
        entries
    }

    /// Renders the non-zero words of the kernel data segment. Nothing is marked.
    pub fn render_kernel_data(&mut self, memory: &Memory) -> Vec<DiffEntry> {
        let shadow = self.kernel_data.get_or_insert_with(WordShadow::new);
        render_upward(shadow, memory.kernel_data(), false)
    }

    /// Renders the live stack, from `sp` (rounded down to a word) up to `STACK_TOP`.
    ///
    /// # Arguments
    ///
    /// * `memory` - Address space holding the stack.
    /// * `sp` - Current stack pointer. Values below the stack limit are clamped to it.
    /// * `compute_diff` - Mark words that changed since the last render, and
    ///   every word below the previous render's lowest address.
    pub fn render_stack(&mut self, memory: &Memory, sp: u32, compute_diff: bool) -> Vec<DiffEntry> {
        let low = round_down_word(sp).max(memory.stack_floor());
        let capacity = (memory.stack_limit() / BYTES_PER_WORD) as usize;
        let previous_low = self.stack_low.replace(low);
        let shadow = self.stack.get_or_insert_with(WordShadow::new);

        if low >= STACK_TOP {
            return Vec::new();
        }
        shadow.ensure_len((((STACK_TOP - low) / BYTES_PER_WORD) as usize).min(capacity));

        (low..STACK_TOP)
            .step_by(BYTES_PER_WORD as usize)
            .map(|addr| {
                let index = ((STACK_TOP - BYTES_PER_WORD - addr) / BYTES_PER_WORD) as usize;
                let value = memory.peek_word(addr).unwrap_or(0);
                let old = shadow.get(index);
                shadow.set(index, value);
                let newly_live = previous_low.is_some_and(|prev| addr < prev);
                DiffEntry::memory(addr, old, value, compute_diff && (newly_live || value != old))
            })
            .collect()
    }

    /// Renders the 32 general registers.
    pub fn render_general(&mut self, registers: &[u32; 32], compute_diff: bool) -> Vec<DiffEntry> {
        let shadow = self.general.get_or_insert_with(WordShadow::new);
        let labelled = registers
            .iter()
            .zip(REG_NAMES)
            .enumerate()
            .map(|(i, (&value, name))| (format!("R{i:<2} ({name:>2})"), value));
        render_registers(shadow, labelled, compute_diff)
    }

    /// Renders the special registers, given as `(name, value)` pairs in display order.
    pub fn render_special(
        &mut self,
        registers: &[(&str, u32)],
        compute_diff: bool,
    ) -> Vec<DiffEntry> {
        let shadow = self.special.get_or_insert_with(WordShadow::new);
        let labelled = registers
            .iter()
            .map(|&(name, value)| (format!("{name:<8}"), value));
        render_registers(shadow, labelled, compute_diff)
    }
}
