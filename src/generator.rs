//! # Generator — One Sorted Batch per Pair Count
//!
//! A batch is every self-descriptive date with exactly `n` pairs. The
//! partitions of one batch are independent, so with `parallel` set they are
//! solved and assembled on the rayon pool; each worker folds its partitions
//! into one buffer, the buffers are joined, and the batch is sorted once.
//! Infeasible partitions contribute nothing.

use rayon::prelude::*;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::assembler::SequenceAssembler;
use crate::error::{AlmanacError, Result};
use crate::partition::{frequency_multisets, FrequencyMultiset};
use crate::solver::AssignmentSolver;
use crate::stats::GenerationStats;
use crate::{DateValue, GeneratorConfig};

/// Builds batches according to a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    config: GeneratorConfig,
    solver: AssignmentSolver,
    assembler: SequenceAssembler,
    stats: Arc<GenerationStats>,
}

impl BatchGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_stats(config, Arc::new(GenerationStats::new()))
    }

    pub fn with_stats(config: GeneratorConfig, stats: Arc<GenerationStats>) -> Self {
        BatchGenerator {
            config,
            solver: AssignmentSolver::new(&config),
            assembler: SequenceAssembler::new(&config),
            stats,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn stats(&self) -> &Arc<GenerationStats> {
        &self.stats
    }

    /// All dates from one frequency multiset, unsorted.
    pub fn dates_for_multiset(&self, multiset: &FrequencyMultiset) -> Result<Vec<DateValue>> {
        self.stats.partitions.fetch_add(1, Ordering::Relaxed);
        let assignments = self.solver.solve(multiset)?;
        if assignments.is_empty() {
            return Ok(Vec::new());
        }
        self.stats
            .assignments
            .fetch_add(assignments.len() as u64, Ordering::Relaxed);

        let mut dates = Vec::new();
        for assignment in &assignments {
            dates.extend(self.assembler.assemble(assignment)?);
        }
        debug!(
            multiset = ?multiset.as_slice(),
            assignments = assignments.len(),
            dates = dates.len(),
            "partition solved"
        );
        Ok(dates)
    }

    /// Every `pairs`-pair date in ascending order.
    pub fn generate_batch(&self, pairs: usize) -> Result<Vec<DateValue>> {
        let started = Instant::now();
        let multisets: Vec<FrequencyMultiset> = frequency_multisets(pairs).collect();

        let mut batch: Vec<DateValue> = if self.config.parallel {
            multisets
                .par_iter()
                .map(|m| self.dates_for_multiset(m))
                .try_fold(Vec::new, |mut acc, dates| {
                    acc.extend(dates?);
                    Ok::<_, AlmanacError>(acc)
                })
                .try_reduce(Vec::new, |mut left, right| {
                    left.extend(right);
                    Ok(left)
                })?
        } else {
            let mut batch = Vec::new();
            for m in &multisets {
                batch.extend(self.dates_for_multiset(m)?);
            }
            batch
        };
        batch.sort_unstable();

        let elapsed = started.elapsed();
        self.stats.batches.fetch_add(1, Ordering::Relaxed);
        self.stats
            .dates
            .fetch_add(batch.len() as u64, Ordering::Relaxed);
        self.stats.record_busy(elapsed);
        debug!(
            pairs,
            partitions = multisets.len(),
            dates = batch.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "batch generated"
        );
        Ok(batch)
    }
}
