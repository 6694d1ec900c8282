//! # Almanac — Self-Descriptive Date Enumeration
//!
//! A self-descriptive date is a positive integer written as `n` two-digit
//! pairs `(frequency, digit)` where every pair's `digit` occurs exactly
//! `frequency` times among all `2n` decimal digits of the integer. `22` is the
//! smallest; `10123133` is the next ("one 0, one 2, three 1s, three 3s").
//!
//! ## Pipeline
//!
//! 1. [`partition`]: frequency multisets of `n` values in `[1, 9]` summing to `2n`.
//! 2. [`solver`]: digit assignments that make every pair's claim true.
//! 3. [`assembler`]: every ordering of an assignment, encoded as an integer.
//! 4. [`generator`]: one sorted batch per pair count.
//! 5. [`cache`]: batches appended in increasing `n`, answering rank queries.
//!
//! [`validator`] re-derives digit counts from an assembled integer and is only
//! consulted in strict mode (see [`config::GeneratorConfig`]).
//!
//! ## Limits
//!
//! Digit components within one date are pairwise distinct, so no date has
//! more than [`MAX_PAIRS`] pairs and the whole sequence is finite. Ten pairs
//! give twenty digits, past `u64::MAX`, hence [`DateValue`] is `u128`.

pub mod assembler;
pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod partition;
pub mod solver;
pub mod stats;
pub mod validator;

use serde::Serialize;

pub use cache::RankedCache;
pub use config::GeneratorConfig;
pub use error::AlmanacError;

/// An assembled self-descriptive date.
pub type DateValue = u128;

/// Largest frequency a pair can state (a single decimal digit, never 0).
pub const MAX_FREQUENCY: u8 = 9;

/// Number of distinct decimal digits.
pub const DIGITS: usize = 10;

/// Upper bound on pairs per date: each pair consumes a distinct digit.
pub const MAX_PAIRS: usize = DIGITS;

/// One `(frequency, digit)` claim: "`digit` occurs `frequency` times".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pair {
    frequency: u8,
    digit: u8,
}

impl Pair {
    /// Checked constructor for callers outside the crate. Returns `None`
    /// unless `frequency` is in `[1, 9]` and `digit` in `[0, 9]`.
    pub fn new(frequency: u8, digit: u8) -> Option<Self> {
        if (1..=MAX_FREQUENCY).contains(&frequency) && (digit as usize) < DIGITS {
            Some(Pair { frequency, digit })
        } else {
            None
        }
    }

    /// Callers guarantee the ranges checked by [`Pair::new`].
    pub(crate) fn from_parts(frequency: u8, digit: u8) -> Self {
        debug_assert!((1..=MAX_FREQUENCY).contains(&frequency));
        debug_assert!((digit as usize) < DIGITS);
        Pair { frequency, digit }
    }

    pub fn frequency(self) -> u8 {
        self.frequency
    }

    pub fn digit(self) -> u8 {
        self.digit
    }

    /// The two decimal digits of this pair as a number in `10..=99`.
    #[inline]
    pub fn encoded(self) -> u8 {
        self.frequency * 10 + self.digit
    }
}

/// Decimal digits of `value`, most significant first. Zero has no digits.
pub fn decimal_digits(value: DateValue) -> Vec<u8> {
    let mut digits = Vec::with_capacity(40);
    let mut rest = value;
    while rest > 0 {
        digits.push((rest % 10) as u8);
        rest /= 10;
    }
    digits.reverse();
    digits
}

/// Exact decimal digit count (0 for zero).
pub fn digit_count(value: DateValue) -> u32 {
    match value.checked_ilog10() {
        Some(log) => log + 1,
        None => 0,
    }
}
