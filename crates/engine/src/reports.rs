//! Read-only report inputs for the render/report sink.

use crate::engine::Engine;
use crate::error::{EngineError, Result};
use resonance_encoding::predicates::{
    binary_reading, hand_balance, is_golden, is_palindrome, is_perfect_square, is_prime, numerology,
    sqrt, BinaryReading, HandBalance,
};
use resonance_encoding::{
    binary_representation, builtin_registry, Value, BINARY_SUM, LEFT_HAND_QWERTY,
    LEFT_HAND_QWERTY_COUNT, RIGHT_HAND_QWERTY, RIGHT_HAND_QWERTY_COUNT,
};
use resonance_graph::{color_family, resonance_color, resonance_weight, Color, ColorFamily};
use resonance_indexer::ResonanceGroup;
use serde::Serialize;
use std::collections::BTreeMap;

/// Numeric facts about one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueFacts {
    pub value: Value,
    pub sqrt: Option<f64>,
    pub perfect_square: bool,
    pub prime: bool,
    pub palindrome: bool,
    pub numerology: Option<u64>,
    pub golden: bool,
}

impl ValueFacts {
    pub fn of(value: &Value) -> Self {
        let palindrome = match value {
            Value::NotApplicable => false,
            other => is_palindrome(&other.to_string()),
        };
        Self {
            value: value.clone(),
            sqrt: sqrt(value),
            perfect_square: is_perfect_square(value),
            prime: is_prime(value),
            palindrome,
            numerology: numerology(value),
            golden: is_golden(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerFacts {
    pub layer: String,
    #[serde(flatten)]
    pub facts: ValueFacts,
}

/// Other members of a group the item belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedResonance {
    pub layer: String,
    pub value: Value,
    pub others: Vec<String>,
}

/// Right-minus-left keyboard hand difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandReport {
    pub positional: i64,
    pub positional_reading: HandBalance,
    pub count: i64,
    pub count_reading: HandBalance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryReport {
    pub representation: String,
    pub sum: Value,
    pub reading: Option<BinaryReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub text: String,
    pub origins: Vec<String>,
    pub palindrome: bool,
    pub color: Color,
    pub hue: f64,
    pub family: ColorFamily,
    pub shared: Vec<SharedResonance>,
    pub layers: Vec<LayerFacts>,
    pub hands: HandReport,
    pub binary: BinaryReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberMatch {
    pub layer: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberReport {
    pub number: f64,
    pub facts: ValueFacts,
    pub matches: Vec<NumberMatch>,
}

impl Engine {
    /// All resonance groups, layer-then-value order.
    pub fn shared_resonances(&self) -> &[ResonanceGroup] {
        self.groups()
    }

    pub fn item_report(&self, text: &str) -> Result<ItemReport> {
        let item = self
            .registry()
            .get(text)
            .ok_or_else(|| EngineError::UnknownItem(text.to_string()))?;
        let text = item.text();

        let shared = self
            .index()
            .groups_containing(text)
            .map(|group| SharedResonance {
                layer: group.layer.clone(),
                value: group.value.clone(),
                others: group.items.iter().filter(|i| *i != text).cloned().collect(),
            })
            .collect();

        let layers = self
            .encodings()
            .evaluate_all(text)
            .map(|(layer, value)| LayerFacts {
                layer: layer.to_string(),
                facts: ValueFacts::of(&value),
            })
            .collect();

        // Hand and binary readings use the full catalogue so they are
        // available even when those layers are not indexed.
        let catalogue = builtin_registry();
        let eval = |name: &str| {
            catalogue
                .get(name)
                .map(|encoding| encoding.evaluate(text))
                .ok()
                .and_then(|value| value.as_integer())
                .unwrap_or(0)
        };
        let positional = eval(RIGHT_HAND_QWERTY) - eval(LEFT_HAND_QWERTY);
        let count = eval(RIGHT_HAND_QWERTY_COUNT) - eval(LEFT_HAND_QWERTY_COUNT);
        let hands = HandReport {
            positional,
            positional_reading: hand_balance(positional),
            count,
            count_reading: hand_balance(count),
        };

        let sum = catalogue
            .get(BINARY_SUM)
            .map(|encoding| encoding.evaluate(text))
            .unwrap_or(Value::NotApplicable);
        let binary = BinaryReport {
            representation: binary_representation(text),
            reading: binary_reading(&sum),
            sum,
        };

        let (color, hue) = resonance_color(resonance_weight(self.graph(), text));

        Ok(ItemReport {
            text: text.to_string(),
            origins: item.origins().iter().cloned().collect(),
            palindrome: is_palindrome(text),
            color,
            hue,
            family: color_family(hue),
            shared,
            layers,
            hands,
            binary,
        })
    }

    /// Items whose value equals `number`, per indexed layer.
    pub fn number_report(&self, number: f64) -> NumberReport {
        let matches = self
            .index()
            .layers()
            .iter()
            .filter_map(|layer| {
                let items: Vec<String> = layer
                    .buckets()
                    .filter(|(value, _)| value.equals_number(number))
                    .flat_map(|(_, items)| items.iter().cloned())
                    .collect();
                (!items.is_empty()).then(|| NumberMatch {
                    layer: layer.layer().to_string(),
                    items,
                })
            })
            .collect();

        NumberReport {
            number,
            facts: ValueFacts::of(&number_value(number)),
            matches,
        }
    }

    /// Groups with a prime value in `layers` (every layer when empty).
    pub fn prime_connections(
        &self,
        layers: &[String],
        skip_single_digit: bool,
    ) -> Result<Vec<&ResonanceGroup>> {
        self.encodings()
            .ensure_known(layers.iter().map(String::as_str))?;
        Ok(self
            .groups()
            .iter()
            .filter(|g| layers.is_empty() || layers.contains(&g.layer))
            .filter(|g| is_prime(&g.value))
            .filter(|g| !skip_single_digit || g.value.as_number().is_some_and(|v| v >= 10.0))
            .collect())
    }

    /// Items grouped by the color family of their resonance-weighted hue.
    pub fn color_families(&self) -> BTreeMap<ColorFamily, Vec<String>> {
        let mut families: BTreeMap<ColorFamily, Vec<String>> = BTreeMap::new();
        for item in self.registry().iter() {
            let (_, hue) = resonance_color(resonance_weight(self.graph(), item.text()));
            families
                .entry(color_family(hue))
                .or_default()
                .push(item.text().to_string());
        }
        families
    }
}

fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Value::Int(number as i64)
    } else {
        Value::float(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_facts_for_common_numbers() {
        let facts = ValueFacts::of(&Value::Int(121));
        assert!(facts.perfect_square && facts.palindrome && !facts.prime);
        assert_eq!(facts.sqrt, Some(11.0));
        assert_eq!(facts.numerology, Some(4));

        let facts = ValueFacts::of(&Value::Int(137));
        assert!(facts.prime && facts.golden);

        let facts = ValueFacts::of(&Value::NotApplicable);
        assert!(!facts.prime && !facts.palindrome && facts.sqrt.is_none());
    }

    #[test]
    fn integral_numbers_report_as_integers() {
        assert_eq!(number_value(48.0), Value::Int(48));
        assert_eq!(number_value(2.5), Value::Float(2.5));
    }
}
