//! Standings calculator - derived rankings for Swiss and round robin
//!
//! A pure function of the graph's terminal matches: recomputing twice
//! with no intervening mutation returns identical rows in identical
//! order.

use podium_core::{BracketGraph, CompetitorId, MatchStatus, SlotSide, StandingRow};
use rustc_hash::FxHashMap;

/// Rank the field from the graph's terminal matches.
///
/// Sort order: wins, then head-to-head when exactly two competitors
/// tie, then map-win differential, then Buchholz, then original seed
/// rank as the deterministic final tiebreak.
pub fn recompute(graph: &BracketGraph) -> Vec<StandingRow> {
    let mut map: FxHashMap<CompetitorId, StandingRow> = graph
        .entrants
        .iter()
        .map(|e| (e.competitor_id, StandingRow::new(e.competitor_id, e.seed_rank)))
        .collect();

    for m in graph.terminal_matches() {
        match (m.winner(), m.loser()) {
            (Some(winner), Some(loser)) => {
                let (diff_w, diff_l) = if m.status == MatchStatus::Forfeited {
                    // A forfeit scores as a full sweep for the winner.
                    let sweep = m.series.wins_needed() as i32;
                    (sweep, -sweep)
                } else {
                    let (ws, ls) = if m.winner_slot == Some(SlotSide::A) {
                        (m.score_a as i32, m.score_b as i32)
                    } else {
                        (m.score_b as i32, m.score_a as i32)
                    };
                    (ws - ls, ls - ws)
                };
                if let Some(row) = map.get_mut(&winner) {
                    row.wins += 1;
                    row.map_win_differential += diff_w;
                    row.opponents_faced.insert(loser);
                }
                if let Some(row) = map.get_mut(&loser) {
                    row.losses += 1;
                    row.map_win_differential += diff_l;
                    row.opponents_faced.insert(winner);
                }
            }
            // A bye win counts, but there is no opponent to record, so
            // it cannot inflate anyone's Buchholz.
            (Some(winner), None) => {
                if let Some(row) = map.get_mut(&winner) {
                    row.wins += 1;
                }
            }
            _ => {}
        }
    }

    let wins_by: FxHashMap<CompetitorId, u32> =
        map.values().map(|r| (r.competitor_id, r.wins)).collect();
    for row in map.values_mut() {
        row.buchholz_score = row
            .opponents_faced
            .iter()
            .filter_map(|id| wins_by.get(id))
            .sum();
    }

    // Collect in entrant order so the stable sort is fully
    // deterministic regardless of hash iteration.
    let mut rows: Vec<StandingRow> = graph
        .entrants
        .iter()
        .filter_map(|e| map.remove(&e.competitor_id))
        .collect();
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.map_win_differential.cmp(&a.map_win_differential))
            .then(b.buchholz_score.cmp(&a.buchholz_score))
            .then(a.seed_rank.cmp(&b.seed_rank))
    });
    apply_head_to_head(graph, &mut rows);
    rows
}

/// For an exact two-way tie on wins, the direct result outranks the
/// differential tiebreaks.
fn apply_head_to_head(graph: &BracketGraph, rows: &mut [StandingRow]) {
    let mut i = 0;
    while i < rows.len() {
        let mut j = i + 1;
        while j < rows.len() && rows[j].wins == rows[i].wins {
            j += 1;
        }
        if j - i == 2 {
            let upper = rows[i].competitor_id;
            let lower = rows[i + 1].competitor_id;
            if head_to_head_net(graph, upper, lower) < 0 {
                rows.swap(i, i + 1);
            }
        }
        i = j;
    }
}

/// Net head-to-head wins of `a` over `b` (0 when they never met or
/// split their meetings).
fn head_to_head_net(graph: &BracketGraph, a: CompetitorId, b: CompetitorId) -> i32 {
    let mut net = 0;
    for m in graph.terminal_matches() {
        let sides = (m.slot_a.competitor(), m.slot_b.competitor());
        let involves = sides == (Some(a), Some(b)) || sides == (Some(b), Some(a));
        if involves {
            if m.winner() == Some(a) {
                net += 1;
            } else if m.winner() == Some(b) {
                net -= 1;
            }
        }
    }
    net
}
