//! Bracket arithmetic - seeding permutation and round naming

/// The classic bracket-seeding permutation.
///
/// Returns the 1-based seed occupying each round-one lineup position;
/// adjacent positions meet in round one. Built by repeated mirroring,
/// so seed 1 and seed 2 land in opposite halves and cannot meet before
/// the final: for a bracket of 8 the order is [1, 8, 4, 5, 2, 7, 3, 6].
pub fn seeding_order(bracket_size: usize) -> Vec<usize> {
    debug_assert!(bracket_size.is_power_of_two() && bracket_size >= 2);
    let mut order = vec![1usize];
    while order.len() < bracket_size {
        let doubled = order.len() * 2;
        let mut next = Vec::with_capacity(doubled);
        for &seed in &order {
            next.push(seed);
            next.push(doubled + 1 - seed);
        }
        order = next;
    }
    order
}

/// Display label for a single-elimination round.
pub fn single_round_label(round_index: usize, total_rounds: usize) -> String {
    match total_rounds - round_index {
        1 => "Final".to_string(),
        2 => "Semifinals".to_string(),
        3 => "Quarterfinals".to_string(),
        n => format!("Round of {}", 1usize << n),
    }
}

/// Display label for an upper-bracket round.
pub fn upper_round_label(round_index: usize, total_rounds: usize) -> String {
    match total_rounds - round_index {
        1 => "Upper Final".to_string(),
        2 => "Upper Semifinals".to_string(),
        3 => "Upper Quarterfinals".to_string(),
        _ => format!("Upper Round {}", round_index + 1),
    }
}

/// Display label for a lower-bracket round.
pub fn lower_round_label(round_index: usize, total_rounds: usize) -> String {
    match total_rounds - round_index {
        1 => "Lower Final".to_string(),
        2 => "Lower Semifinals".to_string(),
        3 => "Lower Quarterfinals".to_string(),
        _ => format!("Lower Round {}", round_index + 1),
    }
}
