use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Output of an encoding for one piece of text.
///
/// Integers and floats compare numerically with each other, so `Int(48)` and
/// `Float(48.0)` land in the same layer bucket. Floats group by exact
/// equality; there is no tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    /// Sentinel for results that have no numeric meaning (e.g. a digit
    /// reduction applied to a text-valued encoding).
    NotApplicable,
}

impl Value {
    /// Build a float value, folding `-0.0` into `0.0` and NaN into
    /// [`Value::NotApplicable`].
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            Value::NotApplicable
        } else if v == 0.0 {
            Value::Float(0.0)
        } else {
            Value::Float(v)
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) | Value::NotApplicable => None,
        }
    }

    /// Integer view, only for integral numeric values.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self, Value::NotApplicable)
    }

    /// Exact numeric match used by value filters. Non-numeric values never match.
    pub fn equals_number(&self, target: f64) -> bool {
        self.as_number().is_some_and(|v| v == target)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::NotApplicable => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (a, b) if a.rank() == 1 && b.rank() == 1 => {
                let (x, y) = (a.as_number().unwrap_or(0.0), b.as_number().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::NotApplicable => {}
            numeric => match numeric.as_integer() {
                Some(i) => i.hash(state),
                None => numeric.as_number().unwrap_or(0.0).to_bits().hash(state),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn int_and_integral_float_are_the_same_key() {
        assert_eq!(Value::Int(48), Value::float(48.0));

        let mut set = HashSet::new();
        set.insert(Value::Int(48));
        assert!(set.contains(&Value::float(48.0)));
    }

    #[test]
    fn floats_group_by_exact_equality() {
        assert_ne!(Value::float(0.1 + 0.2), Value::float(0.3));
        assert_eq!(Value::float(-0.0), Value::float(0.0));
        assert_eq!(Value::float(f64::NAN), Value::NotApplicable);
    }

    #[test]
    fn ordering_puts_numbers_between_sentinel_and_text() {
        let mut map = BTreeMap::new();
        map.insert(Value::Text("0101".into()), "t");
        map.insert(Value::Int(7), "i");
        map.insert(Value::NotApplicable, "n");
        map.insert(Value::float(2.5), "f");

        let order: Vec<_> = map.values().copied().collect();
        assert_eq!(order, vec!["n", "f", "i", "t"]);
    }

    #[test]
    fn non_numeric_values_never_match_filters() {
        assert!(!Value::Text("48".into()).equals_number(48.0));
        assert!(!Value::NotApplicable.equals_number(0.0));
        assert!(Value::Int(48).equals_number(48.0));
    }

    #[test]
    fn display_renders_plain_values() {
        let rendered: Vec<String> = [Value::Int(3), Value::Text("ab".into()), Value::NotApplicable]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["3", "ab", "N/A"]);
    }
}
