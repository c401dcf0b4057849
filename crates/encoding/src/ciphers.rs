//! Built-in encoding catalogue.
//!
//! Letter ciphers look at uppercased ASCII letters only; every other
//! character contributes nothing. `Binary` and `Binary Sum` read raw char
//! codes, so they are case-sensitive.

use crate::predicates::{is_prime_number, reduce_digits, GOLDEN_ANGLE};
use crate::registry::{Encoding, EncodingRegistry};
use crate::value::Value;

pub const SIMPLE: &str = "Simple";
pub const ENGLISH_ORDINAL_X6: &str = "English Ordinal x 6";
pub const JEWISH: &str = "Jewish Gematria";
pub const QWERTY: &str = "Qwerty";
pub const QWERTY_X6: &str = "Qwerty x 6";
pub const LEFT_HAND_QWERTY: &str = "Left-Hand Qwerty";
pub const RIGHT_HAND_QWERTY: &str = "Right-Hand Qwerty";
pub const LEFT_HAND_QWERTY_COUNT: &str = "Left-Hand Qwerty Count";
pub const RIGHT_HAND_QWERTY_COUNT: &str = "Right-Hand Qwerty Count";
pub const AMBIDEXTROUS_BALANCE: &str = "Ambidextrous Balance";
pub const IDEA_NUMEROLOGY: &str = "Idea Numerology";
pub const BINARY: &str = "Binary";
pub const BINARY_SUM: &str = "Binary Sum";
pub const FREQUENT_LETTERS: &str = "Frequent Letters";
pub const LEET_CODE: &str = "Leet Code";
pub const SIMPLE_FORMS: &str = "Simple Forms";
pub const PRIME_GEMATRIA: &str = "Prime Gematria";
pub const SIMPLE_REDUCED: &str = "Simple Reduced";
pub const AAVE_SIMPLE: &str = "Aave Simple";
pub const AAVE_REDUCED: &str = "Aave Reduced";
pub const AAVE_SPIRAL: &str = "Aave Spiral";
pub const GROK_RESONANCE: &str = "Grok Resonance Score";

const QWERTY_ORDER: &str = "QWERTYUIOPASDFGHJKLZXCVBNM";
const LEFT_HAND_KEYS: &str = "QWERTYASDFGZXCVB";
const RIGHT_HAND_KEYS: &str = "YUIOPHJKLNM";
const LEET_LETTERS: &str = "IEASTBO";
const MASTER_NUMBERS: &[u64] = &[11, 22];
const SLANG_BOOST: f64 = 1.1;
const SLANG_WORDS: &[&str] = &[
    "lit", "fam", "dope", "vibe", "chill", "slay", "bet", "fire", "squad", "real",
];

const JEWISH_VALUES: [i64; 26] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 200, 300, 400, 500, 600,
    700, 800,
];

// Indexed by letter: A..Z.
const FREQUENCY_VALUES: [i64; 26] = [
    24, 7, 15, 16, 26, 12, 10, 18, 22, 3, 5, 17, 13, 21, 23, 11, 2, 19, 20, 25, 14, 6, 9, 4, 8, 1,
];

const SIMPLE_FORMS_TABLE: &[(&str, &str)] = &[
    ("you", "u"),
    ("are", "r"),
    ("for", "4"),
    ("be", "b"),
    ("to", "2"),
    ("too", "2"),
    ("see", "c"),
    ("before", "b4"),
    ("the", "da"),
];

fn upper(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_uppercase)
}

fn letter_index(c: char) -> Option<usize> {
    c.is_ascii_uppercase().then(|| (c as u8 - b'A') as usize)
}

fn qwerty_position(c: char) -> Option<i64> {
    QWERTY_ORDER.find(c).map(|idx| idx as i64 + 1)
}

fn simple_sum(text: &str) -> i64 {
    upper(text).filter_map(letter_index).map(|i| i as i64 + 1).sum()
}

fn qwerty_sum(text: &str) -> i64 {
    upper(text).filter_map(qwerty_position).sum()
}

fn hand_sum(text: &str, keys: &str) -> i64 {
    upper(text)
        .filter(|c| keys.contains(*c))
        .filter_map(qwerty_position)
        .sum()
}

fn hand_count(text: &str, keys: &str) -> i64 {
    upper(text).filter(|c| keys.contains(*c)).count() as i64
}

fn binary_string(text: &str) -> String {
    text.chars().map(|c| format!("{:08b}", c as u32)).collect()
}

fn aave_simple(text: &str) -> i64 {
    upper(text)
        .filter(|c| c.is_alphabetic())
        .map(|c| c as i64 - 64)
        .sum()
}

fn aave_reduced(text: &str) -> i64 {
    reduce_digits(aave_simple(text).unsigned_abs(), MASTER_NUMBERS) as i64
}

fn aave_spiral(text: &str) -> f64 {
    let total: f64 = upper(text)
        .enumerate()
        .filter(|(_, c)| c.is_alphabetic())
        .map(|(i, c)| {
            let weight = (GOLDEN_ANGLE * (i + 1) as f64).to_radians().cos();
            (c as i64 - 64) as f64 * weight
        })
        .sum();
    round2(total.abs() * 4.0)
}

fn grok_score(text: &str) -> f64 {
    let boost = if SLANG_WORDS.contains(&text.to_lowercase().as_str()) {
        SLANG_BOOST
    } else {
        1.0
    };
    let sum = aave_simple(text) as f64 + aave_reduced(text) as f64 + aave_spiral(text);
    round2(sum / 3.0 * boost)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Binary rendering of `text` (8-bit minimum width per char code). Reports
/// show it next to the `Binary Sum` layer value.
pub fn binary_representation(text: &str) -> String {
    binary_string(text)
}

/// Registry with every built-in encoding in catalogue order.
pub fn builtin_registry() -> EncodingRegistry {
    let simple = Encoding::new(SIMPLE, |t| Value::Int(simple_sum(t)));
    let simple_reduced = simple.reduced(SIMPLE_REDUCED, &[]);

    let encodings = vec![
        simple,
        Encoding::new(ENGLISH_ORDINAL_X6, |t| Value::Int(simple_sum(t) * 6)),
        Encoding::new(JEWISH, |t| {
            Value::Int(upper(t).filter_map(letter_index).map(|i| JEWISH_VALUES[i]).sum())
        }),
        Encoding::new(QWERTY, |t| Value::Int(qwerty_sum(t))),
        Encoding::new(QWERTY_X6, |t| Value::Int(qwerty_sum(t) * 6)),
        Encoding::new(LEFT_HAND_QWERTY, |t| Value::Int(hand_sum(t, LEFT_HAND_KEYS))),
        Encoding::new(RIGHT_HAND_QWERTY, |t| Value::Int(hand_sum(t, RIGHT_HAND_KEYS))),
        Encoding::new(LEFT_HAND_QWERTY_COUNT, |t| Value::Int(hand_count(t, LEFT_HAND_KEYS))),
        Encoding::new(RIGHT_HAND_QWERTY_COUNT, |t| Value::Int(hand_count(t, RIGHT_HAND_KEYS))),
        Encoding::new(AMBIDEXTROUS_BALANCE, |t| {
            Value::Int(hand_sum(t, RIGHT_HAND_KEYS) - hand_sum(t, LEFT_HAND_KEYS))
        }),
        Encoding::new(IDEA_NUMEROLOGY, |t| {
            let squares: i64 = upper(t)
                .filter_map(letter_index)
                .map(|i| (i as i64 + 1).pow(2))
                .sum();
            Value::Int(squares % 100)
        }),
        Encoding::new(BINARY, |t| Value::Text(binary_string(t))),
        Encoding::new(BINARY_SUM, |t| {
            Value::Int(t.chars().map(|c| (c as u32).count_ones() as i64).sum())
        }),
        Encoding::new(FREQUENT_LETTERS, |t| {
            Value::Int(upper(t).filter_map(letter_index).map(|i| FREQUENCY_VALUES[i]).sum())
        }),
        Encoding::new(LEET_CODE, |t| {
            let kept: String = upper(t).filter(|c| !LEET_LETTERS.contains(*c)).collect();
            Value::Int(simple_sum(&kept))
        }),
        Encoding::new(SIMPLE_FORMS, |t| {
            let lower = t.to_lowercase();
            let form = SIMPLE_FORMS_TABLE
                .iter()
                .find(|(word, _)| *word == lower)
                .map_or(lower.as_str(), |&(_, short)| short);
            Value::Int(simple_sum(form))
        }),
        Encoding::new(PRIME_GEMATRIA, |t| {
            let v = simple_sum(t);
            Value::Int(if is_prime_number(v) { v } else { 0 })
        }),
        simple_reduced,
        Encoding::new(AAVE_SIMPLE, |t| Value::Int(aave_simple(t))),
        Encoding::new(AAVE_REDUCED, |t| Value::Int(aave_reduced(t))),
        Encoding::new(AAVE_SPIRAL, |t| Value::float(aave_spiral(t))),
        Encoding::new(GROK_RESONANCE, |t| Value::float(grok_score(t))),
    ];

    let mut registry = EncodingRegistry::new();
    for encoding in encodings {
        let name = encoding.name().to_string();
        if let Err(err) = registry.insert(encoding) {
            log::error!("Skipping built-in encoding {name}: {err}");
        }
    }
    registry
}
