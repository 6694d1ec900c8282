//! # Cache — Rank-Indexed, Append-Only Date Sequence
//!
//! Batches are appended for `n = 1, 2, 3, …` and never re-sorted against each
//! other. That is sound because an `n`-pair date has exactly `2n` digits (the
//! leading frequency is never 0), so every date in batch `n + 1` is larger
//! than every date in batch `n`. In strict mode the boundary is re-checked on
//! every append.
//!
//! The cache only grows: a rank query generates batches until enough dates
//! exist, and a repeated query is answered without generating anything. Once
//! the batch for [`MAX_PAIRS`] is in, the sequence is complete and larger
//! ranks fail with [`AlmanacError::RankOutOfRange`].

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AlmanacError, Result};
use crate::generator::BatchGenerator;
use crate::stats::GenerationStats;
use crate::{DateValue, GeneratorConfig, MAX_PAIRS};

#[derive(Debug)]
pub struct RankedCache {
    generator: BatchGenerator,
    dates: Vec<DateValue>,
    /// `batch_ends[k]` is the exclusive end of batch `k + 1` in `dates`.
    batch_ends: Vec<usize>,
    next_pairs: usize,
}

impl RankedCache {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_generator(BatchGenerator::new(config))
    }

    pub fn with_generator(generator: BatchGenerator) -> Self {
        RankedCache {
            generator,
            dates: Vec::new(),
            batch_ends: Vec::new(),
            next_pairs: 1,
        }
    }

    /// The `rank`-th smallest self-descriptive date, counting from 1.
    ///
    /// Ranks below 1 are rejected before any work and leave the cache as is.
    pub fn get_nth_date(&mut self, rank: i64) -> Result<DateValue> {
        if rank < 1 {
            return Err(AlmanacError::invalid_rank(rank));
        }
        let wanted = rank as u64;
        let index = usize::try_from(wanted - 1).map_err(|_| AlmanacError::RankOutOfRange {
            rank: wanted,
            available: self.dates.len() as u64,
        })?;

        self.extend_to(index + 1)?;
        self.dates
            .get(index)
            .copied()
            .ok_or_else(|| AlmanacError::RankOutOfRange {
                rank: wanted,
                available: self.dates.len() as u64,
            })
    }

    /// Generate batches until at least `len` dates are cached or the
    /// sequence is complete.
    pub fn extend_to(&mut self, len: usize) -> Result<()> {
        while self.dates.len() < len && !self.is_complete() {
            self.grow()?;
        }
        Ok(())
    }

    /// Generate and append the next batch; returns how many dates it added.
    pub fn grow(&mut self) -> Result<usize> {
        if self.is_complete() {
            return Ok(0);
        }
        let pairs = self.next_pairs;
        let batch = self.generator.generate_batch(pairs)?;

        if self.generator.config().strict {
            if let (Some(&last), Some(&first)) = (self.dates.last(), batch.first()) {
                if first <= last {
                    return Err(AlmanacError::GeneratorInvariantViolation(format!(
                        "batch {} starts at {} which does not exceed {}",
                        pairs, first, last
                    )));
                }
            }
        }

        let added = batch.len();
        self.dates.extend(batch);
        self.batch_ends.push(self.dates.len());
        self.next_pairs += 1;

        if added > 0 {
            info!(pairs, added, cached = self.dates.len(), "batch appended");
        } else {
            debug!(pairs, "no dates with this many pairs");
        }
        Ok(added)
    }

    /// Generate every remaining batch.
    pub fn fill(&mut self) -> Result<()> {
        while !self.is_complete() {
            self.grow()?;
        }
        Ok(())
    }

    /// Dates for exactly `pairs` pairs, if that batch has been generated.
    pub fn batch(&self, pairs: usize) -> Option<&[DateValue]> {
        let index = pairs.checked_sub(1)?;
        let end = *self.batch_ends.get(index)?;
        let start = if index == 0 { 0 } else { self.batch_ends[index - 1] };
        Some(&self.dates[start..end])
    }

    /// All cached dates in ascending order.
    pub fn dates(&self) -> &[DateValue] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Highest pair count generated so far.
    pub fn pairs_generated(&self) -> usize {
        self.next_pairs - 1
    }

    /// True once no further batch can contain a date.
    pub fn is_complete(&self) -> bool {
        self.next_pairs > MAX_PAIRS
    }

    pub fn stats(&self) -> &Arc<GenerationStats> {
        self.generator.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::is_self_descriptive;

    fn cache() -> RankedCache {
        RankedCache::new(GeneratorConfig::default())
    }

    #[test]
    fn first_date_is_twenty_two() {
        let mut c = cache();
        assert_eq!(c.get_nth_date(1).unwrap(), 22);
        assert_eq!(c.pairs_generated(), 1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn second_date_skips_empty_batches() {
        let mut c = cache();
        assert_eq!(c.get_nth_date(2).unwrap(), 10123133);
        assert_eq!(c.pairs_generated(), 4);
        assert_eq!(c.batch(2), Some(&[][..]));
        assert_eq!(c.batch(3), Some(&[][..]));
        assert_eq!(c.batch(4).map(|b| b.len()), Some(840));
        assert_eq!(c.batch(5), None);
    }

    #[test]
    fn known_ranks() {
        let mut c = cache();
        assert_eq!(c.get_nth_date(5).unwrap(), 10143331);
        assert_eq!(c.get_nth_date(841).unwrap(), 33311918);
        assert_eq!(c.get_nth_date(842).unwrap(), 1014223133);
        assert_eq!(c.get_nth_date(3361).unwrap(), 3331221918);
        assert_eq!(c.get_nth_date(3362).unwrap(), 10151623243241);
    }

    #[test]
    fn invalid_ranks_leave_cache_untouched() {
        let mut c = cache();
        for rank in [0, -5, i64::MIN] {
            assert_eq!(
                c.get_nth_date(rank).unwrap_err(),
                AlmanacError::invalid_rank(rank)
            );
        }
        assert!(c.is_empty());
        assert_eq!(c.pairs_generated(), 0);
        assert_eq!(c.stats().snapshot().batches, 0);
    }

    #[test]
    fn repeated_query_is_a_cache_hit() {
        let mut c = cache();
        let first = c.get_nth_date(5).unwrap();
        let batches = c.stats().snapshot().batches;
        let len = c.len();
        let second = c.get_nth_date(5).unwrap();
        assert_eq!(first, second);
        assert_eq!(c.stats().snapshot().batches, batches);
        assert_eq!(c.len(), len);
    }

    #[test]
    fn lower_rank_after_higher_needs_no_generation() {
        let mut c = cache();
        c.get_nth_date(900).unwrap();
        let batches = c.stats().snapshot().batches;
        assert_eq!(c.get_nth_date(3).unwrap(), 10123331);
        assert_eq!(c.stats().snapshot().batches, batches);
    }

    #[test]
    fn batches_increase_strictly_across_boundaries() {
        let mut c = RankedCache::new(GeneratorConfig::strict());
        c.extend_to(3362).unwrap();
        let mut previous_max: Option<DateValue> = None;
        for pairs in 1..=c.pairs_generated() {
            let batch = c.batch(pairs).unwrap();
            if let (Some(max), Some(&min)) = (previous_max, batch.first()) {
                assert!(min > max, "batch {} min {} <= {}", pairs, min, max);
            }
            if let Some(&last) = batch.last() {
                previous_max = Some(last);
            }
        }
    }

    #[test]
    fn cached_sequence_is_strictly_increasing() {
        let mut c = cache();
        c.extend_to(4000).unwrap();
        assert!(c.dates().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn grow_after_complete_is_a_no_op() {
        let mut c = cache();
        c.next_pairs = MAX_PAIRS + 1;
        assert!(c.is_complete());
        assert_eq!(c.grow().unwrap(), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn rank_past_the_end_is_out_of_range() {
        // Pretend everything up to five pairs is all there is.
        let mut c = cache();
        c.extend_to(3361).unwrap();
        c.next_pairs = MAX_PAIRS + 1;
        assert_eq!(
            c.get_nth_date(3362).unwrap_err(),
            AlmanacError::RankOutOfRange {
                rank: 3362,
                available: 3361
            }
        );
        assert_eq!(c.get_nth_date(3361).unwrap(), 3331221918);
    }

    #[test]
    #[ignore] // Builds all 6.5M dates; run with --release --ignored
    fn full_sequence_ends_at_ten_pairs() {
        let mut c = cache();
        c.fill().unwrap();
        assert!(c.is_complete());
        assert_eq!(c.len(), 6_515_041);

        let sizes: Vec<usize> = (1..=MAX_PAIRS).map(|n| c.batch(n).unwrap().len()).collect();
        assert_eq!(
            sizes,
            vec![1, 0, 0, 840, 2520, 0, 100_800, 604_800, 2_177_280, 3_628_800]
        );
        assert_eq!(c.dates().last().copied(), Some(71322723191816151410));
        assert!(c.dates().iter().all(|&d| is_self_descriptive(d)));

        assert_eq!(
            c.get_nth_date(6_515_042).unwrap_err(),
            AlmanacError::RankOutOfRange {
                rank: 6_515_042,
                available: 6_515_041
            }
        );
        assert_eq!(c.get_nth_date(6_515_041).unwrap(), 71322723191816151410);
    }
}
