//! Previous-value storage for differential rendering.

/// The values a region or register set held at the previous render.
///
/// Slots beyond the current length read as zero. Growing keeps every value
/// already recorded and zero-fills the new slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordShadow {
    words: Vec<u32>,
}

impl WordShadow {
    /// Creates an empty shadow.
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Number of slots currently allocated.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Grows to at least `len` slots, preserving recorded values.
    pub fn ensure_len(&mut self, len: usize) {
        if len > self.words.len() {
            self.words.resize(len, 0);
        }
    }

    /// Previous value of slot `index`; unallocated slots read as zero.
    pub fn get(&self, index: usize) -> u32 {
        self.words.get(index).copied().unwrap_or(0)
    }

    /// Records `value` in slot `index`, growing if needed.
    pub fn set(&mut self, index: usize, value: u32) {
        self.ensure_len(index + 1);
        self.words[index] = value;
    }
}
