//! Bye resolution - power-of-two padding for elimination fields

use serde::{Deserialize, Serialize};

/// Padding plan for a field that does not fill its bracket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByePlan {
    /// Smallest power of two >= field size (minimum 2).
    pub bracket_size: usize,
    pub bye_count: usize,
    /// 0-based indexes into the seeded field of the competitors who
    /// receive a bye; by convention the top seeds skip round one.
    pub bye_seed_indexes: Vec<usize>,
}

impl ByePlan {
    /// Matches in round one that actually get played.
    pub fn round_one_match_count(&self, field_size: usize) -> usize {
        (field_size - self.bye_count) / 2
    }
}

/// Compute bracket padding for the given field size.
pub fn compute_byes(field_size: usize) -> ByePlan {
    let bracket_size = field_size.max(2).next_power_of_two();
    let bye_count = bracket_size - field_size;
    ByePlan {
        bracket_size,
        bye_count,
        bye_seed_indexes: (0..bye_count).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two_needs_no_byes() {
        let plan = compute_byes(8);
        assert_eq!(plan.bracket_size, 8);
        assert_eq!(plan.bye_count, 0);
        assert!(plan.bye_seed_indexes.is_empty());
        assert_eq!(plan.round_one_match_count(8), 4);
    }

    #[test]
    fn test_six_team_field() {
        let plan = compute_byes(6);
        assert_eq!(plan.bracket_size, 8);
        assert_eq!(plan.bye_count, 2);
        assert_eq!(plan.bye_seed_indexes, vec![0, 1]);
        assert_eq!(plan.round_one_match_count(6), 2);
    }

    #[test]
    fn test_minimum_bracket_is_two() {
        let plan = compute_byes(2);
        assert_eq!(plan.bracket_size, 2);
        assert_eq!(plan.bye_count, 0);
    }

    #[test]
    fn test_odd_fields() {
        let plan = compute_byes(5);
        assert_eq!(plan.bracket_size, 8);
        assert_eq!(plan.bye_count, 3);
        assert_eq!(plan.round_one_match_count(5), 1);

        let plan = compute_byes(13);
        assert_eq!(plan.bracket_size, 16);
        assert_eq!(plan.bye_count, 3);
        assert_eq!(plan.round_one_match_count(13), 5);
    }
}
