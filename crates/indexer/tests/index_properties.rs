use proptest::prelude::*;
use resonance_encoding::builtin_registry;
use resonance_indexer::{export, ItemRegistry, ResonanceIndex};
use std::collections::HashSet;

fn registry_of(words: &[String]) -> ItemRegistry {
    let mut registry = ItemRegistry::new();
    for word in words {
        registry.add(word, "prop").expect("generated words are valid");
    }
    registry
}

#[test]
fn rebuild_is_deterministic() {
    let words: Vec<String> = ["Beans", "Angel", "Chaos", "Spiral", "Trust", "Snaeb"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let registry = registry_of(&words);
    let encodings = builtin_registry();
    let a = ResonanceIndex::build(&registry, &encodings);
    let b = ResonanceIndex::build(&registry, &encodings);
    assert_eq!(a.groups(), b.groups());
    assert_eq!(a.layers(), b.layers());
}

proptest! {
    #[test]
    fn proptest_every_layer_is_a_partition(words in prop::collection::vec("[a-zA-Z]{1,10}", 0..24)) {
        let registry = registry_of(&words);
        let index = ResonanceIndex::build(&registry, &builtin_registry());
        for layer in index.layers().iter() {
            prop_assert!(layer.is_partition_of(&registry), "{}", layer.layer());
        }
    }

    #[test]
    fn proptest_groups_have_at_least_two_distinct_members(
        words in prop::collection::vec("[a-zA-Z]{1,8}", 0..24),
    ) {
        let registry = registry_of(&words);
        let index = ResonanceIndex::build(&registry, &builtin_registry());
        for group in index.groups() {
            let distinct: HashSet<_> = group.items.iter().collect();
            prop_assert!(group.items.len() >= 2);
            prop_assert_eq!(distinct.len(), group.items.len());
            prop_assert!(group.value.is_applicable());
        }
    }

    #[test]
    fn proptest_repeat_adds_are_idempotent(words in prop::collection::vec("[a-zA-Z]{1,10}", 1..16)) {
        let once = registry_of(&words);
        let mut doubled = words.clone();
        doubled.extend(words.iter().map(|w| w.to_uppercase()));
        let twice = registry_of(&doubled);
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(export(&once), export(&twice));
    }
}
