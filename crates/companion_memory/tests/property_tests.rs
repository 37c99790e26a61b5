//! Property-based tests for companion_memory.
//!
//! The short-term buffer must behave like a FIFO window over every interaction
//! ever added, and relevance retrieval must be a pure function of its inputs.

use companion_core::config::MemoryConfig;
use companion_memory::ConversationMemory;
use proptest::prelude::*;

fn memory_in(dir: &tempfile::TempDir, capacity: usize) -> ConversationMemory {
    ConversationMemory::new(&MemoryConfig {
        short_term_capacity: capacity,
        long_term_path: dir.path().join("ltm.json"),
        ..MemoryConfig::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After N additions the buffer holds exactly the newest min(N, capacity), in order.
    #[test]
    fn short_term_is_fifo_window(capacity in 1usize..12, n in 0usize..40) {
        let dir = tempfile::tempdir().unwrap();
        let mut memory = memory_in(&dir, capacity);
        for i in 0..n {
            memory.add_interaction(&format!("m{}", i), "r", None);
        }
        let kept: Vec<String> = memory.short_term().iter().map(|i| i.user_input().to_string()).collect();
        let expected: Vec<String> = (n.saturating_sub(capacity)..n).map(|i| format!("m{}", i)).collect();
        prop_assert_eq!(kept, expected);
    }

    /// Recent context renders exactly min(n, len) exchanges.
    #[test]
    fn recent_context_line_count(len in 0usize..10, n in 0usize..15) {
        let dir = tempfile::tempdir().unwrap();
        let mut memory = memory_in(&dir, 10);
        for i in 0..len {
            memory.add_interaction(&format!("q{}", i), &format!("a{}", i), None);
        }
        let ctx = memory.get_recent_context(n);
        prop_assert_eq!(ctx.lines().count(), 2 * n.min(len));
    }

    /// Retrieval is deterministic, bounded by `limit`, and sorted by descending score.
    #[test]
    fn relevant_memories_sorted_and_bounded(
        words in proptest::collection::vec("[a-c]{1,3}", 1..8),
        query in "[a-c ]{0,12}",
        limit in 0usize..6,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let mut memory = memory_in(&dir, 10);
        for w in &words {
            memory.add_interaction(&format!("remember {}", w), "ok", None);
        }
        let first = memory.get_relevant_memories(&query, limit);
        let second = memory.get_relevant_memories(&query, limit);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= limit);

        let scores: Vec<usize> = first
            .iter()
            .map(|m| companion_memory::relevance_score(&query, m))
            .collect();
        prop_assert!(scores.iter().all(|s| *s > 0));
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
