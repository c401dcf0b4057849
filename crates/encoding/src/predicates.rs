//! Small pure checks for "interesting" values.
//!
//! Every predicate takes a [`Value`] and answers `false`/`None` for
//! non-numeric input, so text-valued layers and the not-applicable sentinel
//! drop out of prime/square/golden checks instead of raising.

use crate::value::Value;

/// Centre of the golden-angle window used by [`is_golden`].
pub const GOLDEN_ANGLE: f64 = 137.5;
const GOLDEN_TOLERANCE: f64 = 5.0;

/// Largest magnitude at which every integer is exactly representable as f64.
/// Integer checks answer `false` above it.
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn exact_integer(value: &Value) -> Option<f64> {
    value
        .as_number()
        .filter(|v| v.is_finite() && v.abs() <= MAX_EXACT_INTEGER)
        .map(f64::trunc)
}

pub fn is_prime(value: &Value) -> bool {
    exact_integer(value).is_some_and(|v| is_prime_number(v as i64))
}

pub fn is_prime_number(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

pub fn is_perfect_square(value: &Value) -> bool {
    match exact_integer(value) {
        Some(v) if v >= 0.0 => {
            let n = v as u64;
            let root = integer_sqrt(n);
            root.checked_mul(root) == Some(n)
        }
        _ => false,
    }
}

fn integer_sqrt(n: u64) -> u64 {
    let n = u128::from(n);
    let mut root = (n as f64).sqrt() as u128;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root as u64
}

/// Within five of 137 or of the golden angle.
pub fn is_golden(value: &Value) -> bool {
    value
        .as_number()
        .is_some_and(|v| (v - 137.0).abs() <= GOLDEN_TOLERANCE || (v - GOLDEN_ANGLE).abs() <= GOLDEN_TOLERANCE)
}

/// Square root for display; `None` for negative or non-numeric values.
pub fn sqrt(value: &Value) -> Option<f64> {
    value.as_number().filter(|v| *v >= 0.0).map(f64::sqrt)
}

/// Digit-sum reduction to a single digit. Negative input reduces its
/// absolute value; floats are truncated first.
pub fn numerology(value: &Value) -> Option<u64> {
    let n = value.as_number().filter(|v| v.is_finite())?;
    Some(reduce_digits(n.trunc().abs() as u64, &[]))
}

/// Repeated digit sum, stopping early at any of `masters`.
pub fn reduce_digits(mut n: u64, masters: &[u64]) -> u64 {
    while n > 9 && !masters.contains(&n) {
        n = digit_sum(n);
    }
    n
}

fn digit_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Case-insensitive palindrome check over alphanumeric characters.
pub fn is_palindrome(text: &str) -> bool {
    let cleaned: Vec<char> = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// Sign reading of a right-minus-left hand difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandBalance {
    Positive,
    Negative,
    Neutral,
}

pub fn hand_balance(diff: i64) -> HandBalance {
    match diff.signum() {
        1 => HandBalance::Positive,
        -1 => HandBalance::Negative,
        _ => HandBalance::Neutral,
    }
}

/// Reading of a binary digit sum: prime first, then parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryReading {
    Prime,
    Even,
    Odd,
}

pub fn binary_reading(sum: &Value) -> Option<BinaryReading> {
    let n = sum.as_integer()?;
    Some(if is_prime_number(n) {
        BinaryReading::Prime
    } else if n % 2 == 0 {
        BinaryReading::Even
    } else {
        BinaryReading::Odd
    })
}
