//! # Validator — Independent Self-Descriptiveness Check
//!
//! Re-derives everything from the decimal digits alone: split into
//! consecutive pairs, collect the claimed `(frequency, digit)` set, count how
//! often each digit really occurs, and compare. Knows nothing about how the
//! value was generated, which is what makes it useful as a cross-check in
//! strict mode.

use std::collections::BTreeSet;

use crate::{decimal_digits, DateValue, DIGITS};

/// Split `value` into `(frequency, digit)` pairs, or `None` for an odd digit count.
pub fn decode_pairs(value: DateValue) -> Option<Vec<(u8, u8)>> {
    let digits = decimal_digits(value);
    if digits.len() % 2 != 0 {
        return None;
    }
    Some(digits.chunks_exact(2).map(|c| (c[0], c[1])).collect())
}

/// True iff every pair's claim holds and every digit present is claimed.
///
/// Zero has no pairs at all and is rejected.
pub fn is_self_descriptive(value: DateValue) -> bool {
    let digits = decimal_digits(value);
    if digits.is_empty() || digits.len() % 2 != 0 {
        return false;
    }

    let claimed: BTreeSet<(u32, u8)> = digits
        .chunks_exact(2)
        .map(|c| (c[0] as u32, c[1]))
        .collect();

    let mut occurrences = [0u32; DIGITS];
    for &d in &digits {
        occurrences[d as usize] += 1;
    }
    let actual: BTreeSet<(u32, u8)> = occurrences
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(digit, &count)| (count, digit as u8))
        .collect();

    claimed == actual
}
