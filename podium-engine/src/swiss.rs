//! Swiss generator and per-round pairing
//!
//! Round one pairs the top half of the seeded field against the bottom
//! half. Every later round is paired lazily by the progression engine
//! once the previous round finishes: competitors are grouped by win
//! count, paired within their group without rematches where a perfect
//! matching exists, and floated down when a group is odd. When a group
//! cannot be paired without a rematch the pairing falls back and flags
//! the affected matches.

use crate::config::GenerateConfig;
use crate::standings;
use podium_core::{
    BracketError, BracketGraph, BracketSection, BracketSections, CompetitorId, EventFormat, Match,
    MatchId, MatchStatus, Round, SeedEntry, SlotRef, SlotSide,
};
use rustc_hash::FxHashSet;

/// ceil(log2(n)) for n >= 2.
fn default_round_count(field: usize) -> usize {
    field.next_power_of_two().trailing_zeros() as usize
}

pub(crate) fn generate(
    entries: &[SeedEntry],
    config: &GenerateConfig,
) -> Result<BracketGraph, BracketError> {
    let field = entries.len();
    let total_rounds = config
        .swiss_rounds
        .unwrap_or_else(|| default_round_count(field));

    let mut graph = BracketGraph::new(
        EventFormat::Swiss,
        entries.to_vec(),
        BracketSections::League { rounds: Vec::new() },
    );
    graph.settings.series = config.series;
    graph.settings.bracket_reset = false;
    graph.total_rounds = total_rounds;

    // Round one: seed i of the top half against seed i of the bottom
    // half; an odd field gives its lowest seed the first bye.
    let half = field / 2;
    let mut round = Round::new(0, "Round 1");
    for i in 0..half {
        let a = entries[i].competitor_id;
        let b = entries[half + i].competitor_id;
        let id = push_swiss_match(&mut graph, 0, i, a, Some(b), false);
        round.match_ids.push(id);
    }
    if field % 2 == 1 {
        let lowest = entries[field - 1].competitor_id;
        let id = push_swiss_match(&mut graph, 0, half, lowest, None, false);
        round.match_ids.push(id);
    }

    let BracketSections::League { rounds } = &mut graph.sections else {
        unreachable!("section layout fixed above");
    };
    rounds.push(round);
    Ok(graph)
}

/// Pair the next round from current standings. Caller guarantees the
/// previous round has finished and more rounds are owed.
pub(crate) fn pair_next_round(graph: &mut BracketGraph) -> Result<Vec<MatchId>, BracketError> {
    let rows = standings::recompute(graph);
    let played = played_pairs(graph);
    let prior_byes = bye_recipients(graph);

    // Standings order doubles as pairing order within a group.
    let mut pool: Vec<(CompetitorId, u32)> =
        rows.iter().map(|r| (r.competitor_id, r.wins)).collect();

    let mut bye = None;
    if pool.len() % 2 == 1 {
        let pick = pool
            .iter()
            .rev()
            .find(|(id, _)| !prior_byes.contains(id))
            .or_else(|| pool.last())
            .map(|(id, _)| *id)
            .ok_or_else(|| BracketError::Integrity("swiss pairing on empty field".into()))?;
        pool.retain(|(id, _)| *id != pick);
        bye = Some(pick);
    }

    // Score groups, best first; odd groups float their lowest member
    // into the group below.
    let mut pairs: Vec<(CompetitorId, CompetitorId, bool)> = Vec::new();
    let mut carry: Vec<CompetitorId> = Vec::new();
    let mut i = 0;
    while i < pool.len() {
        let wins = pool[i].1;
        let mut members = std::mem::take(&mut carry);
        while i < pool.len() && pool[i].1 == wins {
            members.push(pool[i].0);
            i += 1;
        }
        if members.len() % 2 == 1 {
            carry.push(members.pop().expect("odd group is non-empty"));
        }
        if members.is_empty() {
            continue;
        }
        match pair_without_rematch(&members, &played) {
            Some(found) => pairs.extend(found.into_iter().map(|(a, b)| (a, b, false))),
            None => {
                // Exhausted group: allow rematches, flagged.
                for chunk in members.chunks(2) {
                    let rematch = played.contains(&pair_key(chunk[0], chunk[1]));
                    pairs.push((chunk[0], chunk[1], rematch));
                }
            }
        }
    }
    if !carry.is_empty() {
        return Err(BracketError::Integrity(
            "swiss pairing left a floater unpaired".into(),
        ));
    }

    let round_index = {
        let BracketSections::League { rounds } = &graph.sections else {
            return Err(BracketError::Integrity("swiss graph without league rounds".into()));
        };
        rounds.len()
    };

    let mut round = Round::new(round_index, format!("Round {}", round_index + 1));
    let mut created = Vec::new();
    for (slot, (a, b, fallback)) in pairs.into_iter().enumerate() {
        let id = push_swiss_match(graph, round_index, slot, a, Some(b), fallback);
        round.match_ids.push(id);
        created.push(id);
    }
    if let Some(competitor) = bye {
        let slot = round.match_ids.len();
        let id = push_swiss_match(graph, round_index, slot, competitor, None, false);
        round.match_ids.push(id);
        created.push(id);
    }

    let BracketSections::League { rounds } = &mut graph.sections else {
        unreachable!("checked above");
    };
    rounds.push(round);
    Ok(created)
}

/// First perfect matching that avoids all rematches, trying opponents
/// in standings order.
fn pair_without_rematch(
    members: &[CompetitorId],
    played: &FxHashSet<(CompetitorId, CompetitorId)>,
) -> Option<Vec<(CompetitorId, CompetitorId)>> {
    if members.is_empty() {
        return Some(Vec::new());
    }
    let first = members[0];
    for j in 1..members.len() {
        let opponent = members[j];
        if played.contains(&pair_key(first, opponent)) {
            continue;
        }
        let rest: Vec<CompetitorId> = members[1..]
            .iter()
            .copied()
            .filter(|&c| c != opponent)
            .collect();
        if let Some(mut tail) = pair_without_rematch(&rest, played) {
            let mut out = vec![(first, opponent)];
            out.append(&mut tail);
            return Some(out);
        }
    }
    None
}

fn pair_key(a: CompetitorId, b: CompetitorId) -> (CompetitorId, CompetitorId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Every pair that has already been scheduled against each other.
fn played_pairs(graph: &BracketGraph) -> FxHashSet<(CompetitorId, CompetitorId)> {
    let mut set = FxHashSet::default();
    for m in &graph.matches {
        if let (Some(a), Some(b)) = (m.slot_a.competitor(), m.slot_b.competitor()) {
            set.insert(pair_key(a, b));
        }
    }
    set
}

/// Competitors who have already received a bye.
fn bye_recipients(graph: &BracketGraph) -> FxHashSet<CompetitorId> {
    graph
        .matches
        .iter()
        .filter(|m| m.slot_b.is_bye())
        .filter_map(|m| m.slot_a.competitor())
        .collect()
}

/// A bye pairing completes immediately as an automatic win.
fn push_swiss_match(
    graph: &mut BracketGraph,
    round_index: usize,
    slot_index: usize,
    a: CompetitorId,
    b: Option<CompetitorId>,
    pairing_fallback: bool,
) -> MatchId {
    let series = graph.settings.series;
    let slot_b = match b {
        Some(id) => SlotRef::Competitor(id),
        None => SlotRef::Bye,
    };
    let id = graph.alloc_match_id();
    let mut m = Match::new(
        id,
        round_index,
        slot_index,
        BracketSection::Swiss,
        series,
        SlotRef::Competitor(a),
        slot_b,
    );
    m.pairing_fallback = pairing_fallback;
    if b.is_some() {
        m.status = MatchStatus::Ready;
    } else {
        m.status = MatchStatus::Completed;
        m.winner_slot = Some(SlotSide::A);
    }
    graph.push_match(m)
}
