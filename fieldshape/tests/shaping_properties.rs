//! Property-based tests for shaping.
//!
//! - Parsing is insensitive to case, padding and repetition
//! - A shaped record's keys are exactly the requested names that exist
//! - `shape_many` agrees with `shape_one` element by element

use fieldshape::{shapeable, FieldSelection, FieldShaper, PropertyCache, ShaperConfig};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Habit {
    id: u32,
    name: String,
    length: u32,
    archived: bool,
}

shapeable!(Habit { id as "Id", name as "Name", length as "Length", archived as "IsArchived" });

const KNOWN: [&str; 4] = ["Id", "Name", "Length", "IsArchived"];

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn habit_strategy() -> impl Strategy<Value = Habit> {
    (any::<u32>(), "[a-zA-Z ]{0,20}", any::<u32>(), any::<bool>()).prop_map(
        |(id, name, length, archived)| Habit {
            id,
            name,
            length,
            archived,
        },
    )
}

/// Field names drawn from the known properties plus a few unknown ones.
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(KNOWN.to_vec()).prop_map(str::to_owned),
        prop::sample::select(vec!["Color", "size", "owner"]).prop_map(str::to_owned),
    ]
}

/// Randomizes case and surrounding whitespace of a name.
fn mangle(name: &str, upper: bool, pad: usize) -> String {
    let cased = if upper { name.to_uppercase() } else { name.to_lowercase() };
    format!("{}{}{}", " ".repeat(pad), cased, " ".repeat(pad))
}

fn shaper() -> FieldShaper {
    FieldShaper::with_cache(ShaperConfig::default(), Arc::new(PropertyCache::new()))
}

proptest! {
    #[test]
    fn parse_ignores_case_padding_and_repeats(
        names in prop::collection::vec(name_strategy(), 0..6),
        upper in any::<bool>(),
        pad in 0usize..3,
    ) {
        let plain = names.join(",");
        let mangled = names
            .iter()
            .chain(names.iter())
            .map(|n| mangle(n, upper, pad))
            .collect::<Vec<_>>()
            .join(",");

        prop_assert_eq!(
            FieldSelection::parse(Some(plain.as_str())),
            FieldSelection::parse(Some(mangled.as_str()))
        );
    }

    #[test]
    fn keys_are_intersection_of_request_and_properties(
        habit in habit_strategy(),
        names in prop::collection::vec(name_strategy(), 0..6),
    ) {
        let fields = names.join(",");
        let record = shaper().shape_one(&habit, Some(fields.as_str())).unwrap();
        let keys: BTreeSet<String> = record.keys().map(str::to_owned).collect();

        let expected: BTreeSet<String> = if names.is_empty() {
            KNOWN.iter().map(|k| k.to_string()).collect()
        } else {
            KNOWN
                .iter()
                .filter(|k| names.iter().any(|n| n.eq_ignore_ascii_case(k)))
                .map(|k| k.to_string())
                .collect()
        };
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn validate_true_iff_no_unknown_names(
        names in prop::collection::vec(name_strategy(), 0..6),
    ) {
        let fields = names.join(",");
        let all_known = names
            .iter()
            .all(|n| KNOWN.iter().any(|k| k.eq_ignore_ascii_case(n)));
        prop_assert_eq!(shaper().validate::<Habit>(Some(fields.as_str())), all_known);
    }

    #[test]
    fn shape_many_agrees_with_shape_one(
        habits in prop::collection::vec(habit_strategy(), 0..8),
        names in prop::collection::vec(name_strategy(), 0..4),
    ) {
        let s = shaper();
        let fields = names.join(" , ");
        let many = s.shape_many(&habits, Some(fields.as_str())).unwrap();

        prop_assert_eq!(many.len(), habits.len());
        for (habit, record) in habits.iter().zip(&many) {
            prop_assert_eq!(record, &s.shape_one(habit, Some(fields.as_str())).unwrap());
        }
    }
}
