use crate::layer_index::{LayerIndex, LayerIndexSet};
use resonance_encoding::Value;
use serde::Serialize;

/// Two or more items sharing one value under one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResonanceGroup {
    pub layer: String,
    pub value: Value,
    pub items: Vec<String>,
}

impl ResonanceGroup {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.items.iter().any(|item| item == text)
    }

    /// Unordered pairs within the group: `k * (k - 1) / 2`.
    pub fn pair_count(&self) -> usize {
        let k = self.items.len();
        k * k.saturating_sub(1) / 2
    }
}

/// Buckets of size >= 2, in value order. Not-applicable buckets are skipped.
pub fn extract(index: &LayerIndex) -> Vec<ResonanceGroup> {
    index
        .buckets()
        .filter(|(value, items)| value.is_applicable() && items.len() >= 2)
        .map(|(value, items)| ResonanceGroup {
            layer: index.layer().to_string(),
            value: value.clone(),
            items: items.to_vec(),
        })
        .collect()
}

/// Groups for every layer, layer-then-value order.
pub fn extract_all(indices: &LayerIndexSet) -> Vec<ResonanceGroup> {
    indices.iter().flat_map(extract).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ItemRegistry;
    use pretty_assertions::assert_eq;
    use resonance_encoding::{builtin_registry, Encoding, SIMPLE};

    #[test]
    fn singletons_are_dropped() {
        let mut registry = ItemRegistry::new();
        registry.add("Beans", "t").unwrap();
        registry.add("Dream", "t").unwrap();
        let encodings = builtin_registry();
        let index = LayerIndex::build(registry.iter(), encodings.get(SIMPLE).unwrap());
        assert!(extract(&index).is_empty());

        registry.add("Snaeb", "t").unwrap();
        let index = LayerIndex::build(registry.iter(), encodings.get(SIMPLE).unwrap());
        assert_eq!(
            extract(&index),
            vec![ResonanceGroup {
                layer: SIMPLE.to_string(),
                value: Value::Int(48),
                items: vec!["Beans".into(), "Snaeb".into()],
            }]
        );
    }

    #[test]
    fn not_applicable_buckets_never_resonate() {
        let mut registry = ItemRegistry::new();
        registry.add("Beans", "t").unwrap();
        registry.add("Dream", "t").unwrap();
        let na = Encoding::new("Nothing", |_| Value::NotApplicable);
        let index = LayerIndex::build(registry.iter(), &na);
        assert!(index.is_partition_of(&registry));
        assert!(extract(&index).is_empty());
    }

    #[test]
    fn pair_count_is_quadratic() {
        let group = ResonanceGroup {
            layer: "L".into(),
            value: Value::Int(1),
            items: (0..5).map(|i| i.to_string()).collect(),
        };
        assert_eq!(group.pair_count(), 10);
    }
}
