//! Word-granular memory region.
//!
//! A `Region` is a contiguous run of words starting at `bot`. Upward regions
//! grow by appending words (raising `top`); the stack grows by prepending words
//! (lowering `bot`). Neither ever shrinks, and existing words keep their
//! addresses across growth.

use crate::common::constants::BYTES_PER_WORD;

/// A contiguous, word-addressed memory region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    bot: u32,
    words: Vec<u32>,
}

impl Region {
    /// Creates a zero-filled region of `size` bytes (rounded down to whole words) at `bot`.
    pub fn new(bot: u32, size: u32) -> Self {
        Self {
            bot,
            words: vec![0; (size / BYTES_PER_WORD) as usize],
        }
    }

    /// Creates a region with no words at `bot`.
    pub const fn empty(bot: u32) -> Self {
        Self {
            bot,
            words: Vec::new(),
        }
    }

    /// Lowest address held by the region.
    pub const fn bot(&self) -> u32 {
        self.bot
    }

    /// One past the highest address held by the region.
    ///
    /// Saturates at `u32::MAX` for a region ending at the top of the address space.
    pub fn top(&self) -> u32 {
        u32::try_from(self.top_wide()).unwrap_or(u32::MAX)
    }

    fn top_wide(&self) -> u64 {
        u64::from(self.bot) + self.words.len() as u64 * u64::from(BYTES_PER_WORD)
    }

    /// Size of the region in bytes.
    pub fn len_bytes(&self) -> u32 {
        self.top() - self.bot
    }

    /// Returns true if the region holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns true if `addr` lies within `[bot, top)`.
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.bot && u64::from(addr) < self.top_wide()
    }

    fn index(&self, addr: u32) -> Option<usize> {
        if self.contains(addr) {
            Some(((addr - self.bot) / BYTES_PER_WORD) as usize)
        } else {
            None
        }
    }

    /// Reads the word containing `addr`, if mapped.
    pub fn read_word(&self, addr: u32) -> Option<u32> {
        self.index(addr).map(|i| self.words[i])
    }

    /// Writes the word containing `addr`.
    ///
    /// # Returns
    ///
    /// `false` if `addr` lies outside the region; nothing is written.
    pub fn write_word(&mut self, addr: u32, val: u32) -> bool {
        match self.index(addr) {
            Some(i) => {
                self.words[i] = val;
                true
            }
            None => false,
        }
    }

    /// Raises `top` to at least `new_top` (rounded up to a word), zero-filling new words.
    pub fn grow_to(&mut self, new_top: u32) {
        let wanted = new_top.saturating_sub(self.bot).div_ceil(BYTES_PER_WORD) as usize;
        if wanted > self.words.len() {
            self.words.resize(wanted, 0);
        }
    }

    /// Lowers `bot` to at most `new_bot` (rounded down to a word), zero-filling new words.
    ///
    /// Words already present keep their addresses.
    pub fn grow_down_to(&mut self, new_bot: u32) {
        let new_bot = new_bot & !(BYTES_PER_WORD - 1);
        if new_bot >= self.bot {
            return;
        }
        let extra = ((self.bot - new_bot) / BYTES_PER_WORD) as usize;
        let mut words = vec![0; extra + self.words.len()];
        words[extra..].copy_from_slice(&self.words);
        self.words = words;
        self.bot = new_bot;
    }

    /// Moves an empty region to `bot`. Non-empty regions are left untouched.
    pub fn rebase_if_empty(&mut self, bot: u32) {
        if self.words.is_empty() {
            self.bot = bot & !(BYTES_PER_WORD - 1);
        }
    }

    /// The region's words in address order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Iterates `(address, word)` pairs in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let bot = self.bot;
        self.words
            .iter()
            .enumerate()
            .map(move |(i, &w)| (bot + i as u32 * BYTES_PER_WORD, w))
    }
}
