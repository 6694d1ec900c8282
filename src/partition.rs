//! # Partition — Frequency Multiset Enumeration
//!
//! A date with `n` pairs has `2n` digits, and the per-digit occurrence counts
//! stated by its pairs must add up to that total. So the frequencies of an
//! `n`-pair date form a partition of `2n` into exactly `n` parts, each part a
//! single non-zero digit.
//!
//! ## Algorithm
//!
//! Depth-first descent that fixes one part at a time in non-decreasing order,
//! driven by an explicit stack of frames rather than recursion so the
//! enumerator is a plain lazy [`Iterator`]. At position `i`, with `t` left to
//! distribute over `k` parts and the previous part `m`, the next part ranges
//! over `[m, min(t / k, 9)]`: any larger value would force a later part to be
//! smaller than it. The last part is forced to equal `t` and is accepted only
//! if it lies in `[m, 9]`.
//!
//! Each multiset is produced exactly once, in lexicographic order.

use crate::MAX_FREQUENCY;

/// Non-decreasing frequencies, each in `[1, 9]`, summing to twice the length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrequencyMultiset(Vec<u8>);

impl FrequencyMultiset {
    /// Returns `None` if `parts` breaks any multiset invariant.
    pub fn new(parts: Vec<u8>) -> Option<Self> {
        let in_range = parts.iter().all(|&p| (1..=MAX_FREQUENCY).contains(&p));
        let sorted = parts.windows(2).all(|w| w[0] <= w[1]);
        let total: usize = parts.iter().map(|&p| p as usize).sum();
        if !parts.is_empty() && in_range && sorted && total == 2 * parts.len() {
            Some(FrequencyMultiset(parts))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of pairs a date built from this multiset has.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `counts()[f]` is how many pairs carry frequency `f`. Index 0 is unused.
    pub fn counts(&self) -> [u8; MAX_FREQUENCY as usize + 1] {
        let mut counts = [0u8; MAX_FREQUENCY as usize + 1];
        for &part in &self.0 {
            counts[part as usize] += 1;
        }
        counts
    }
}

/// Choices still to try for one position of the partition.
#[derive(Debug, Clone, Copy)]
struct Frame {
    next: u8,
    max: u8,
}

impl Frame {
    fn open(minimum: u8, remaining_total: usize, remaining_parts: usize) -> Self {
        if remaining_parts == 1 {
            if (minimum as usize) <= remaining_total && remaining_total <= MAX_FREQUENCY as usize {
                let last = remaining_total as u8;
                return Frame { next: last, max: last };
            }
            return Frame::exhausted();
        }
        let max = (remaining_total / remaining_parts).min(MAX_FREQUENCY as usize) as u8;
        Frame { next: minimum, max }
    }

    fn exhausted() -> Self {
        Frame { next: 1, max: 0 }
    }
}

/// Lazy enumeration of every [`FrequencyMultiset`] with a given number of parts.
#[derive(Debug, Clone)]
pub struct PartitionEnumerator {
    parts: usize,
    total: usize,
    /// Values fixed at positions `0..frames.len() - 1`.
    chosen: Vec<u8>,
    /// `frames[i]` holds the untried values for position `i`.
    frames: Vec<Frame>,
}

impl PartitionEnumerator {
    pub fn new(pairs: usize) -> Self {
        let total = 2 * pairs;
        let mut frames = Vec::with_capacity(pairs);
        if pairs > 0 {
            frames.push(Frame::open(1, total, pairs));
        }
        PartitionEnumerator {
            parts: pairs,
            total,
            chosen: Vec::with_capacity(pairs),
            frames,
        }
    }
}

impl Iterator for PartitionEnumerator {
    type Item = FrequencyMultiset;

    fn next(&mut self) -> Option<FrequencyMultiset> {
        loop {
            let depth = self.frames.len();
            let frame = self.frames.last_mut()?;
            if frame.next > frame.max {
                self.frames.pop();
                self.chosen.pop();
                continue;
            }
            let value = frame.next;
            frame.next += 1;

            if depth == self.parts {
                let mut parts = self.chosen.clone();
                parts.push(value);
                return Some(FrequencyMultiset(parts));
            }

            self.chosen.push(value);
            let used: usize = self.chosen.iter().map(|&p| p as usize).sum();
            self.frames
                .push(Frame::open(value, self.total - used, self.parts - depth));
        }
    }
}

/// Every frequency multiset for an `n`-pair date.
pub fn frequency_multisets(pairs: usize) -> PartitionEnumerator {
    PartitionEnumerator::new(pairs)
}
