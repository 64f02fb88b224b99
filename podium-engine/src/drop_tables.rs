//! Static lower-bracket drop tables for double elimination
//!
//! The mapping from an upper-bracket loss to a lower-bracket slot is
//! precomputed data, one table per bracket size. The 8-team table uses
//! the staggered layout (upper round k's losers first enter lower round
//! 2k-1, 1-indexed, one per round); larger sizes use the standard
//! interleaved layout, with drop order reversed in the minor rounds to
//! delay rematches. Changing convention means editing a table, not
//! logic.

use podium_core::SlotSide;

/// Destination slot for an upper-bracket loser or an advancing
/// lower-bracket winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DropSlot {
    pub lower_round: usize,
    pub lower_match: usize,
    pub slot: SlotSide,
}

const fn d(lower_round: usize, lower_match: usize, slot: SlotSide) -> DropSlot {
    DropSlot {
        lower_round,
        lower_match,
        slot,
    }
}

use SlotSide::{A, B};

/// Lower-bracket layout for one bracket size.
pub(crate) struct DropTable {
    /// Match count of each lower round.
    pub round_sizes: &'static [usize],
    /// `drops[upper_round][upper_match]` = where that loser lands.
    pub drops: &'static [&'static [DropSlot]],
}

static TABLE_4: DropTable = DropTable {
    round_sizes: &[1, 1],
    drops: &[
        &[d(0, 0, A), d(0, 0, B)],
        &[d(1, 0, B)],
    ],
};

static TABLE_8: DropTable = DropTable {
    round_sizes: &[2, 1, 1, 1, 1],
    drops: &[
        &[d(0, 0, A), d(0, 0, B), d(0, 1, A), d(0, 1, B)],
        &[d(2, 0, B), d(3, 0, B)],
        &[d(4, 0, B)],
    ],
};

static TABLE_16: DropTable = DropTable {
    round_sizes: &[4, 4, 2, 2, 1, 1],
    drops: &[
        &[
            d(0, 0, A), d(0, 0, B), d(0, 1, A), d(0, 1, B),
            d(0, 2, A), d(0, 2, B), d(0, 3, A), d(0, 3, B),
        ],
        &[d(1, 3, B), d(1, 2, B), d(1, 1, B), d(1, 0, B)],
        &[d(3, 1, B), d(3, 0, B)],
        &[d(5, 0, B)],
    ],
};

static TABLE_32: DropTable = DropTable {
    round_sizes: &[8, 8, 4, 4, 2, 2, 1, 1],
    drops: &[
        &[
            d(0, 0, A), d(0, 0, B), d(0, 1, A), d(0, 1, B),
            d(0, 2, A), d(0, 2, B), d(0, 3, A), d(0, 3, B),
            d(0, 4, A), d(0, 4, B), d(0, 5, A), d(0, 5, B),
            d(0, 6, A), d(0, 6, B), d(0, 7, A), d(0, 7, B),
        ],
        &[
            d(1, 7, B), d(1, 6, B), d(1, 5, B), d(1, 4, B),
            d(1, 3, B), d(1, 2, B), d(1, 1, B), d(1, 0, B),
        ],
        &[d(3, 3, B), d(3, 2, B), d(3, 1, B), d(3, 0, B)],
        &[d(5, 1, B), d(5, 0, B)],
        &[d(7, 0, B)],
    ],
};

static TABLE_64: DropTable = DropTable {
    round_sizes: &[16, 16, 8, 8, 4, 4, 2, 2, 1, 1],
    drops: &[
        &[
            d(0, 0, A), d(0, 0, B), d(0, 1, A), d(0, 1, B),
            d(0, 2, A), d(0, 2, B), d(0, 3, A), d(0, 3, B),
            d(0, 4, A), d(0, 4, B), d(0, 5, A), d(0, 5, B),
            d(0, 6, A), d(0, 6, B), d(0, 7, A), d(0, 7, B),
            d(0, 8, A), d(0, 8, B), d(0, 9, A), d(0, 9, B),
            d(0, 10, A), d(0, 10, B), d(0, 11, A), d(0, 11, B),
            d(0, 12, A), d(0, 12, B), d(0, 13, A), d(0, 13, B),
            d(0, 14, A), d(0, 14, B), d(0, 15, A), d(0, 15, B),
        ],
        &[
            d(1, 15, B), d(1, 14, B), d(1, 13, B), d(1, 12, B),
            d(1, 11, B), d(1, 10, B), d(1, 9, B), d(1, 8, B),
            d(1, 7, B), d(1, 6, B), d(1, 5, B), d(1, 4, B),
            d(1, 3, B), d(1, 2, B), d(1, 1, B), d(1, 0, B),
        ],
        &[
            d(3, 7, B), d(3, 6, B), d(3, 5, B), d(3, 4, B),
            d(3, 3, B), d(3, 2, B), d(3, 1, B), d(3, 0, B),
        ],
        &[d(5, 3, B), d(5, 2, B), d(5, 1, B), d(5, 0, B)],
        &[d(7, 1, B), d(7, 0, B)],
        &[d(9, 0, B)],
    ],
};

/// Table for a bracket size, if supported.
pub(crate) fn for_bracket_size(size: usize) -> Option<&'static DropTable> {
    match size {
        4 => Some(&TABLE_4),
        8 => Some(&TABLE_8),
        16 => Some(&TABLE_16),
        32 => Some(&TABLE_32),
        64 => Some(&TABLE_64),
        _ => None,
    }
}

/// Winner destination inside the lower bracket. None for the lower
/// final, whose winner advances to the grand final instead.
pub(crate) fn lower_advance(sizes: &[usize], round: usize, index: usize) -> Option<DropSlot> {
    let next = round + 1;
    if next >= sizes.len() {
        return None;
    }
    if sizes[next] == sizes[round] {
        // Entering a drop round: hold the lane; side B belongs to the
        // incoming upper-bracket loser.
        Some(d(next, index, A))
    } else {
        // Consolidation round: adjacent winners pair up.
        let slot = if index % 2 == 0 { A } else { B };
        Some(d(next, index / 2, slot))
    }
}
