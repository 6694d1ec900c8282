//! # Solver — Digit Assignment for a Frequency Multiset
//!
//! Given the frequencies an `n`-pair date will state, decide which digit each
//! pair describes so that every claim comes out true.
//!
//! ## Forced placements
//!
//! Let `count[f]` be the number of pairs with frequency `f`. Digit `f` is then
//! written `count[f]` times as a frequency, so it occurs in the date, so some
//! pair must describe it, and that pair adds one more occurrence. The only
//! pair that can describe `f` therefore has frequency `count[f] + 1`. If the
//! multiset has no open slot of that frequency the multiset is infeasible.
//! Values are placed in descending `count[f]`, ties by descending `f`.
//!
//! ## Free slots
//!
//! A digit that is not a frequency value occurs only as a digit component, so
//! exactly once: it can fill a frequency-1 slot and nothing else. After the
//! forced placements every remaining slot must have frequency 1; each choice
//! of that many unused, non-frequency digits is one assignment. Slots of
//! frequency 1 are interchangeable, so choices are combinations, generated
//! with an index array in lexicographic order.
//!
//! Slot bookkeeping is a fixed array of open-slot counters per frequency value
//! and a 10-bit mask of unused digits; nothing is cloned per branch.

use crate::error::{AlmanacError, Result};
use crate::partition::FrequencyMultiset;
use crate::{GeneratorConfig, Pair, DIGITS, MAX_FREQUENCY};

/// Pairs whose frequencies match one multiset and whose digits are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    pairs: Vec<Pair>,
}

impl Assignment {
    pub(crate) fn new(mut pairs: Vec<Pair>) -> Self {
        pairs.sort_unstable();
        Assignment { pairs }
    }

    /// Pairs ordered by `(frequency, digit)`.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Frequency components in non-decreasing order.
    pub fn frequencies(&self) -> Vec<u8> {
        self.pairs.iter().map(|p| p.frequency()).collect()
    }
}

/// Bitmask with every decimal digit available.
const ALL_DIGITS: u16 = (1 << DIGITS) - 1;

/// Solves frequency multisets into digit assignments.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentSolver {
    strict: bool,
}

impl AssignmentSolver {
    pub fn new(config: &GeneratorConfig) -> Self {
        AssignmentSolver {
            strict: config.strict,
        }
    }

    /// Every valid assignment for `multiset`; empty when it is infeasible.
    ///
    /// Errors only in strict mode, when a slot other than frequency 1 is still
    /// open after the forced placements.
    pub fn solve(&self, multiset: &FrequencyMultiset) -> Result<Vec<Assignment>> {
        let counts = multiset.counts();
        let mut open = counts;
        let mut available = ALL_DIGITS;
        let mut forced = Vec::with_capacity(multiset.len());

        for value in placement_order(&counts) {
            let target = counts[value as usize] as usize + 1;
            if target > MAX_FREQUENCY as usize || open[target] == 0 {
                return Ok(Vec::new());
            }
            open[target] -= 1;
            available &= !(1 << value);
            forced.push(Pair::from_parts(target as u8, value));
        }

        if let Some(stuck) = (2..=MAX_FREQUENCY).find(|&f| open[f as usize] > 0) {
            if self.strict {
                return Err(AlmanacError::GeneratorInvariantViolation(format!(
                    "frequency {} slot left open after forced placement for {:?}",
                    stuck,
                    multiset.as_slice()
                )));
            }
            // Any digit placed there would occur exactly once.
            return Ok(Vec::new());
        }

        let pool: Vec<u8> = (0..DIGITS as u8)
            .filter(|&d| available & (1 << d) != 0)
            .collect();
        let free_slots = open[1] as usize;
        if free_slots > pool.len() {
            return Ok(Vec::new());
        }

        let mut assignments = Vec::new();
        let mut chosen: Vec<usize> = (0..free_slots).collect();
        loop {
            let mut pairs = forced.clone();
            pairs.extend(chosen.iter().map(|&i| Pair::from_parts(1, pool[i])));
            assignments.push(Assignment::new(pairs));
            if !next_combination(&mut chosen, pool.len()) {
                break;
            }
        }
        Ok(assignments)
    }
}

/// Distinct frequency values, most frequent first, ties by larger value.
fn placement_order(counts: &[u8]) -> Vec<u8> {
    let mut values: Vec<u8> = (1..=MAX_FREQUENCY)
        .filter(|&f| counts[f as usize] > 0)
        .collect();
    values.sort_unstable_by(|&a, &b| {
        counts[b as usize]
            .cmp(&counts[a as usize])
            .then(b.cmp(&a))
    });
    values
}

/// Advance `indices` (strictly increasing, all `< n`) to the next combination
/// in lexicographic order. Returns false once the last one has been passed.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    for i in (0..k).rev() {
        if indices[i] < n - k + i {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
