//! # Assembler — Orderings of an Assignment as Integers
//!
//! Every ordering of an assignment's pairs is a distinct date: the digit
//! components are pairwise distinct, so no two orderings write the same
//! digit string. Orderings are walked with the iterative form of Heap's
//! algorithm (one swap per step, a counter array instead of recursion) and
//! each is folded left to right as `value * 100 + frequency * 10 + digit`.
//! The first pair always has a non-zero frequency, so the encoding never
//! loses a leading digit and an `n`-pair date always has `2n` digits.

use crate::error::{AlmanacError, Result};
use crate::solver::Assignment;
use crate::validator::is_self_descriptive;
use crate::{DateValue, GeneratorConfig, Pair};

/// Encode pairs in the given order as one integer.
#[inline]
pub fn encode(pairs: &[Pair]) -> DateValue {
    pairs
        .iter()
        .fold(0, |value, pair| value * 100 + pair.encoded() as DateValue)
}

/// Call `visit` once for every ordering of `pairs` (`n!` calls).
pub fn for_each_ordering(pairs: &[Pair], mut visit: impl FnMut(&[Pair])) {
    let mut items = pairs.to_vec();
    let n = items.len();
    let mut counters = vec![0usize; n];
    visit(&items);

    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            visit(&items);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

/// Expands assignments into dates.
#[derive(Debug, Clone, Copy)]
pub struct SequenceAssembler {
    strict: bool,
}

impl SequenceAssembler {
    pub fn new(config: &GeneratorConfig) -> Self {
        SequenceAssembler {
            strict: config.strict,
        }
    }

    /// All `n!` dates for `assignment`, unsorted.
    ///
    /// In strict mode each date is re-checked by the validator first.
    pub fn assemble(&self, assignment: &Assignment) -> Result<Vec<DateValue>> {
        let mut dates = Vec::with_capacity(factorial(assignment.len()));
        for_each_ordering(assignment.pairs(), |ordering| dates.push(encode(ordering)));

        if self.strict {
            if let Some(&bad) = dates.iter().find(|&&d| !is_self_descriptive(d)) {
                return Err(AlmanacError::rejected_date(bad));
            }
        }
        Ok(dates)
    }
}

fn factorial(n: usize) -> usize {
    (1..=n).product()
}
