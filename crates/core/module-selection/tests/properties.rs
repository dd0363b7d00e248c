//! Invariants of the reconciler over arbitrary catalogs and toggle sequences.

use std::collections::HashSet;

use console_async::types::AvailableModule;
use module_selection::{Preselection, Reconciler, SelectionSet, SequenceMap};
use proptest::prelude::*;

/// Catalog with ids 1..=n, random names, configured flags, and sequences.
fn catalog_strategy() -> impl Strategy<Value = (Vec<AvailableModule>, SequenceMap)> {
    prop::collection::vec(("[A-Za-z]{0,6}", any::<bool>(), prop::option::of(0u32..5)), 0..12)
        .prop_map(|rows| {
            let mut sequences = SequenceMap::new();
            let modules = rows
                .into_iter()
                .enumerate()
                .map(|(i, (name, is_configured, seq))| {
                    let id = i as u64 + 1;
                    if let Some(seq) = seq {
                        sequences.insert(id, seq);
                    }
                    AvailableModule {
                        id,
                        name,
                        is_configured,
                    }
                })
                .collect();
            (modules, sequences)
        })
}

/// Toggles over ids 0..=14, so some fall outside the catalog.
fn toggles_strategy() -> impl Strategy<Value = Vec<(u64, bool)>> {
    prop::collection::vec((0u64..15, any::<bool>()), 0..30)
}

fn load(modules: &[AvailableModule], sequences: SequenceMap, pre: &str) -> Reconciler {
    let mut r = Reconciler::new(sequences, Preselection::parse(pre));
    let ticket = r.begin_load(1, 1).expect("nonzero scope");
    r.complete_load(ticket, Ok(modules.to_vec()));
    r
}

proptest! {
    /// Every catalog id lands in exactly one of kept / add / remove / untouched.
    #[test]
    fn partition_is_disjoint_cover(
        (modules, sequences) in catalog_strategy(),
        toggles in toggles_strategy(),
    ) {
        let mut r = load(&modules, sequences, "");
        for (id, on) in toggles {
            r.toggle(id, on);
        }
        let p = r.partition();

        let kept: HashSet<u64> = p.kept.iter().map(|e| e.id).collect();
        let add: HashSet<u64> = p.to_add.iter().map(|e| e.id).collect();
        let remove: HashSet<u64> = p.to_remove.iter().map(|e| e.id).collect();

        for m in &modules {
            let selected = r.is_selected(m.id);
            let classes = [
                kept.contains(&m.id),
                add.contains(&m.id),
                remove.contains(&m.id),
                !selected && !m.is_configured,
            ];
            prop_assert_eq!(classes.iter().filter(|c| **c).count(), 1);
            prop_assert_eq!(kept.contains(&m.id), selected && m.is_configured);
            prop_assert_eq!(add.contains(&m.id), selected && !m.is_configured);
            prop_assert_eq!(remove.contains(&m.id), !selected && m.is_configured);
        }
        prop_assert_eq!(kept.len() + add.len() + remove.len(),
            p.kept.len() + p.to_add.len() + p.to_remove.len());
    }

    /// Partition lists are sorted by sequence.
    #[test]
    fn partition_lists_sorted_by_sequence(
        (modules, sequences) in catalog_strategy(),
        toggles in toggles_strategy(),
    ) {
        let mut r = load(&modules, sequences, "");
        for (id, on) in toggles {
            r.toggle(id, on);
        }
        let p = r.partition();
        for list in [&p.kept, &p.to_add, &p.to_remove] {
            prop_assert!(list.windows(2).all(|w| w[0].sequence <= w[1].sequence));
        }
    }

    /// Repeating a toggle changes nothing further.
    #[test]
    fn toggle_is_idempotent(
        (modules, sequences) in catalog_strategy(),
        id in 0u64..15,
        on in any::<bool>(),
    ) {
        let mut once = load(&modules, sequences, "");
        once.toggle(id, on);
        let mut twice = once.clone();
        prop_assert!(!twice.toggle(id, on));
        prop_assert_eq!(once.serialize(), twice.serialize());
        prop_assert_eq!(once.partition(), twice.partition());
    }

    /// Parsing the serialized selection gives back the same ordered set.
    #[test]
    fn serialize_round_trips(
        (modules, sequences) in catalog_strategy(),
        toggles in toggles_strategy(),
    ) {
        let mut r = load(&modules, sequences, "");
        for (id, on) in toggles {
            r.toggle(id, on);
        }
        let parsed = SelectionSet::parse(&r.serialize());
        prop_assert_eq!(&parsed, r.selection());
    }

    /// Reloading yields baseline ∪ preselection no matter what was selected before.
    #[test]
    fn reload_resets_to_baseline_and_preselection(
        (modules, sequences) in catalog_strategy(),
        toggles in toggles_strategy(),
        pre in prop::collection::vec(0u64..15, 0..5),
    ) {
        let pre_str = pre.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        let mut r = load(&modules, sequences, &pre_str);
        for (id, on) in toggles {
            r.toggle(id, on);
        }

        let ticket = r.begin_load(1, 1).expect("nonzero scope");
        r.complete_load(ticket, Ok(modules.clone()));

        let catalog_ids: HashSet<u64> = modules.iter().map(|m| m.id).collect();
        let expected: HashSet<u64> = modules
            .iter()
            .filter(|m| m.is_configured)
            .map(|m| m.id)
            .chain(pre.iter().copied().filter(|id| catalog_ids.contains(id)))
            .collect();
        let actual: HashSet<u64> = r.selection().iter().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Display list is sorted by (sequence, name) and every row matches the term.
    #[test]
    fn filter_is_totally_ordered(
        (modules, sequences) in catalog_strategy(),
        term in "[a-z]{0,2}",
    ) {
        let r = load(&modules, sequences, "");
        let rows = r.filter(&term);
        for w in rows.windows(2) {
            prop_assert!((w[0].sequence, &w[0].name, w[0].id) < (w[1].sequence, &w[1].name, w[1].id));
        }
        for m in &rows {
            prop_assert!(m.name.to_lowercase().contains(&term));
        }
    }
}
