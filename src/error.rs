//! # Error — Failure Modes of the Date Generator
//!
//! Infeasible search branches (a forced slot already full, a frequency with
//! no matching slot) are not errors: the enumerators simply yield nothing for
//! them. Only caller mistakes and genuine generator defects surface here.

use thiserror::Error;

use crate::DateValue;

/// Errors returned by the generator and the ranked cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlmanacError {
    /// Rank below 1, or a rank string that is not an integer.
    #[error("invalid rank {0:?}: ranks start at 1")]
    InvalidRank(String),

    /// Every batch has been generated and the sequence is shorter than the rank.
    #[error("rank {rank} is beyond the last self-descriptive date ({available} exist)")]
    RankOutOfRange { rank: u64, available: u64 },

    /// Strict mode caught the generator producing something it never should.
    #[error("generator invariant violated: {0}")]
    GeneratorInvariantViolation(String),
}

impl AlmanacError {
    /// Build an `InvalidRank` for a numeric rank.
    pub fn invalid_rank(rank: i64) -> Self {
        AlmanacError::InvalidRank(rank.to_string())
    }

    /// Strict-mode rejection of an assembled date.
    pub fn rejected_date(value: DateValue) -> Self {
        AlmanacError::GeneratorInvariantViolation(format!(
            "assembled date {} is not self-descriptive",
            value
        ))
    }
}

pub type Result<T> = std::result::Result<T, AlmanacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rank_message_names_the_rank() {
        let err = AlmanacError::invalid_rank(-5);
        assert_eq!(err, AlmanacError::InvalidRank("-5".into()));
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn out_of_range_message_includes_total() {
        let err = AlmanacError::RankOutOfRange {
            rank: 7_000_000,
            available: 6_515_041,
        };
        let msg = err.to_string();
        assert!(msg.contains("7000000"));
        assert!(msg.contains("6515041"));
    }

    #[test]
    fn rejected_date_is_an_invariant_violation() {
        match AlmanacError::rejected_date(1234) {
            AlmanacError::GeneratorInvariantViolation(msg) => assert!(msg.contains("1234")),
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
