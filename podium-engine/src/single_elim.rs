//! Single-elimination generator

use crate::bracket_math::{seeding_order, single_round_label};
use crate::byes::compute_byes;
use crate::config::GenerateConfig;
use crate::progression;
use podium_core::{
    BracketError, BracketGraph, BracketSection, BracketSections, EventFormat, Match, MatchId,
    NextRef, Round, SeedEntry, SlotRef, SlotSide,
};

/// Build a single-elimination bracket for an already seeded field.
///
/// Round one follows the bracket-seeding permutation, so top seeds are
/// kept apart until the latest possible round and byes fall on the top
/// seeds. Bye matches complete during generation; their winners are in
/// place before this returns.
pub(crate) fn generate(
    entries: &[SeedEntry],
    config: &GenerateConfig,
) -> Result<BracketGraph, BracketError> {
    let plan = compute_byes(entries.len());
    let bracket = plan.bracket_size;
    let total_rounds = bracket.trailing_zeros() as usize;

    let mut graph = BracketGraph::new(
        EventFormat::SingleElimination,
        entries.to_vec(),
        BracketSections::SingleElimination { rounds: Vec::new() },
    );
    graph.settings.series = config.series;
    graph.settings.bracket_reset = false;
    graph.total_rounds = total_rounds;

    let order = seeding_order(bracket);
    let mut rounds: Vec<Round> = Vec::with_capacity(total_rounds);
    let mut prev_ids: Vec<MatchId> = Vec::new();
    for r in 0..total_rounds {
        let match_count = bracket >> (r + 1);
        let series = if r + 1 == total_rounds {
            config.finals_series
        } else {
            config.series
        };
        let mut round = Round::new(r, single_round_label(r, total_rounds));
        let mut ids = Vec::with_capacity(match_count);
        for s in 0..match_count {
            let (slot_a, slot_b) = if r == 0 {
                (
                    seed_slot(order[2 * s], entries),
                    seed_slot(order[2 * s + 1], entries),
                )
            } else {
                (
                    SlotRef::Awaiting(prev_ids[2 * s]),
                    SlotRef::Awaiting(prev_ids[2 * s + 1]),
                )
            };
            let id = graph.alloc_match_id();
            graph.push_match(Match::new(
                id,
                r,
                s,
                BracketSection::Single,
                series,
                slot_a,
                slot_b,
            ));
            round.match_ids.push(id);
            ids.push(id);
        }
        for (i, &prev) in prev_ids.iter().enumerate() {
            let slot = if i % 2 == 0 { SlotSide::A } else { SlotSide::B };
            graph.require_mut(prev)?.next_match_on_win = Some(NextRef::new(ids[i / 2], slot));
        }
        prev_ids = ids;
        rounds.push(round);
    }

    let BracketSections::SingleElimination { rounds: dest } = &mut graph.sections else {
        unreachable!("section layout fixed above");
    };
    *dest = rounds;

    progression::finalize_generation(&mut graph)?;
    Ok(graph)
}

/// Slot for a 1-based seed position; phantom seeds beyond the field
/// become byes.
pub(crate) fn seed_slot(seed: usize, entries: &[SeedEntry]) -> SlotRef {
    if seed <= entries.len() {
        SlotRef::Competitor(entries[seed - 1].competitor_id)
    } else {
        SlotRef::Bye
    }
}
