//! Engine error taxonomy
//!
//! Three families, handled differently by callers:
//! - input validation: caller mistakes, never retried, no state touched
//! - concurrency: expected races, caller re-fetches and retries
//! - structural: upstream bug or data corruption, fatal for the request

use crate::ids::MatchId;
use crate::matches::MatchStatus;
use crate::series::SeriesFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BracketError {
    #[error("unknown bracket format: {0}")]
    InvalidFormat(String),

    #[error("unknown seeding policy: {0}")]
    InvalidSeedingPolicy(String),

    #[error("cannot generate a bracket for an empty field")]
    EmptyField,

    #[error("{format} requires at least {minimum} teams, got {actual}")]
    InsufficientTeams {
        format: &'static str,
        minimum: usize,
        actual: usize,
    },

    #[error("field of {0} exceeds the largest supported bracket size (64)")]
    FieldTooLarge(usize),

    #[error("score {score_a}-{score_b} is not a decisive {series} result")]
    InvalidScore {
        score_a: u8,
        score_b: u8,
        series: SeriesFormat,
    },

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("stale version for match {match_id}: expected {expected}, current {current}")]
    StaleVersion {
        match_id: MatchId,
        expected: u64,
        current: u64,
    },

    #[error("match {match_id} is {status:?} and cannot accept a result")]
    InvalidStatusTransition {
        match_id: MatchId,
        status: MatchStatus,
    },

    #[error("no bracket exists for event {0}")]
    EventNotFound(String),

    #[error("bracket integrity violation: {0}")]
    Integrity(String),
}

impl BracketError {
    /// Caller-mistake input errors (reject, never retry).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BracketError::InvalidFormat(_)
                | BracketError::InvalidSeedingPolicy(_)
                | BracketError::EmptyField
                | BracketError::InsufficientTeams { .. }
                | BracketError::FieldTooLarge(_)
                | BracketError::InvalidScore { .. }
        )
    }

    /// Expected-in-normal-operation races (re-fetch and retry).
    pub fn is_concurrency(&self) -> bool {
        matches!(self, BracketError::StaleVersion { .. })
    }

    /// Programming or data-corruption bugs (fatal for the request).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            BracketError::MatchNotFound(_)
                | BracketError::InvalidStatusTransition { .. }
                | BracketError::Integrity(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        assert!(BracketError::EmptyField.is_validation());
        assert!(BracketError::InvalidScore {
            score_a: 2,
            score_b: 2,
            series: SeriesFormat::Bo3
        }
        .is_validation());
        assert!(BracketError::StaleVersion {
            match_id: MatchId(1),
            expected: 0,
            current: 1
        }
        .is_concurrency());
        assert!(BracketError::MatchNotFound(MatchId(1)).is_structural());
        assert!(!BracketError::EmptyField.is_structural());
    }

    #[test]
    fn test_error_messages() {
        let err = BracketError::InsufficientTeams {
            format: "double_elimination",
            minimum: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "double_elimination requires at least 4 teams, got 3"
        );

        let err = BracketError::StaleVersion {
            match_id: MatchId(5),
            expected: 1,
            current: 2,
        };
        assert!(err.to_string().contains("M5"));
    }
}
