//! Property-based tests for History Manager operations.
//!
//! These tests verify that the history stays bounded and newest-first for
//! arbitrary append sequences, and that whatever is persisted loads back
//! unchanged.

use calcdesk::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use calcdesk::services::key_value_store::MemoryStore;
use proptest::prelude::*;

/// Strategy for plausible `(expression, result)` pairs.
fn arb_calculation() -> impl Strategy<Value = (String, String)> {
    ("[1-9][0-9]{0,3}([+*/-][0-9]{1,3}){0,3}", "-?[0-9]{1,6}")
}

// *For any* sequence of appends, the history never exceeds its capacity and
// holds the most recent appends, newest first.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn history_is_bounded_and_newest_first(
        calcs in proptest::collection::vec(arb_calculation(), 0..120),
        capacity in 1usize..60,
    ) {
        let mut manager =
            HistoryManager::with_options(Box::new(MemoryStore::new()), "calcHistory", capacity);

        for (expression, result) in &calcs {
            manager.append(expression, result);
        }

        let expected: Vec<&(String, String)> = calcs.iter().rev().take(capacity).collect();
        prop_assert_eq!(manager.len(), expected.len());
        prop_assert!(manager.len() <= capacity);

        for (entry, (expression, result)) in manager.entries().iter().zip(expected) {
            prop_assert_eq!(&entry.expression, expression);
            prop_assert_eq!(&entry.result, result);
        }
    }

    #[test]
    fn history_default_capacity_is_fifty(
        calcs in proptest::collection::vec(arb_calculation(), 51..80),
    ) {
        let mut manager = HistoryManager::new(Box::new(MemoryStore::new()));
        for (expression, result) in &calcs {
            manager.append(expression, result);
        }

        prop_assert_eq!(manager.len(), 50);
        let newest = calcs.last().unwrap();
        prop_assert_eq!(&manager.entries()[0].expression, &newest.0);
    }

    // *For any* history, a manager reopened over the same store sees the same
    // entries in the same order.
    #[test]
    fn history_persist_then_load_round_trips(
        calcs in proptest::collection::vec(arb_calculation(), 0..20),
    ) {
        let mut manager = HistoryManager::new(Box::new(MemoryStore::new()));
        for (expression, result) in &calcs {
            manager.append(expression, result);
        }
        let before = manager.entries().to_vec();

        let reopened = HistoryManager::new(manager.into_store());
        prop_assert_eq!(reopened.entries(), before.as_slice());
    }
}
