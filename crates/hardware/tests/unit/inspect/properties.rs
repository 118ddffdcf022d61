use proptest::prelude::*;
use spim_core::common::constants::DATA_BOT;
use spim_core::config::MemoryConfig;
use spim_core::inspect::StateSnapshotter;
use spim_core::soc::memory::Memory;

const WORDS: usize = 32;

fn small_data() -> Memory {
    Memory::new(&MemoryConfig {
        data_size: WORDS as u32 * 4,
        ..MemoryConfig::default()
    })
}

fn fill(memory: &mut Memory, words: &[u32]) {
    for (i, &w) in words.iter().enumerate() {
        memory.write_word(DATA_BOT + i as u32 * 4, w).unwrap();
    }
}

/// Mostly zeros, so hidden words are exercised.
fn sparse_word() -> impl Strategy<Value = u32> {
    prop_oneof![3 => Just(0u32), 1 => any::<u32>(), 1 => 0u32..4]
}

proptest! {
    #[test]
    fn data_marks_exactly_the_changed_words(
        before in prop::collection::vec(sparse_word(), WORDS),
        after in prop::collection::vec(sparse_word(), WORDS),
    ) {
        let mut memory = small_data();
        let mut snapshotter = StateSnapshotter::new();
        fill(&mut memory, &before);
        let _ = snapshotter.render_data(&memory, false);

        fill(&mut memory, &after);
        let entries = snapshotter.render_data(&memory, true);

        let expected: Vec<(u32, u32, bool)> = after
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0)
            .map(|(i, &w)| (DATA_BOT + i as u32 * 4, w, w != before[i]))
            .collect();
        let actual: Vec<(u32, u32, bool)> = entries
            .iter()
            .map(|e| (e.address.unwrap(), e.value, e.changed))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn growth_never_marks_existing_words(
        words in prop::collection::vec(sparse_word(), WORDS),
        grow_words in 1i32..64,
    ) {
        let mut memory = Memory::new(&MemoryConfig {
            data_size: WORDS as u32 * 4,
            data_limit: 0x1000,
            ..MemoryConfig::default()
        });
        let mut snapshotter = StateSnapshotter::new();
        fill(&mut memory, &words);
        let _ = snapshotter.render_data(&memory, false);

        prop_assert!(memory.sbrk(grow_words * 4).is_some());
        let entries = snapshotter.render_data(&memory, true);

        prop_assert_eq!(entries.len(), words.iter().filter(|&&w| w != 0).count());
        prop_assert!(entries.iter().all(|e| !e.changed));
    }

    #[test]
    fn data_render_is_idempotent(words in prop::collection::vec(sparse_word(), WORDS)) {
        let mut memory = small_data();
        let mut snapshotter = StateSnapshotter::new();
        fill(&mut memory, &words);

        let first = snapshotter.render_data(&memory, true);
        let second = snapshotter.render_data(&memory, true);

        prop_assert_eq!(first.len(), second.len());
        prop_assert!(second.iter().all(|e| !e.changed));
    }

    #[test]
    fn registers_mark_exactly_the_changed_values(
        before in prop::array::uniform32(sparse_word()),
        after in prop::array::uniform32(sparse_word()),
    ) {
        let mut snapshotter = StateSnapshotter::new();
        let _ = snapshotter.render_general(&before, false);

        let entries = snapshotter.render_general(&after, true);

        for (i, entry) in entries.iter().enumerate() {
            prop_assert_eq!(entry.old, before[i]);
            prop_assert_eq!(entry.value, after[i]);
            prop_assert_eq!(entry.changed, before[i] != after[i]);
        }
    }

    #[test]
    fn without_diff_nothing_is_marked(
        before in prop::array::uniform32(any::<u32>()),
        after in prop::array::uniform32(any::<u32>()),
    ) {
        let mut snapshotter = StateSnapshotter::new();
        let _ = snapshotter.render_general(&before, true);

        prop_assert!(snapshotter.render_general(&after, false).iter().all(|e| !e.changed));
    }
}
