//! Double-elimination generator
//!
//! Upper bracket topology matches single elimination; the lower bracket
//! is wired from the static drop table for the bracket size. Upper
//! matches carry a loss link into the lower bracket; lower matches do
//! not (a second loss eliminates). The finalists of both brackets meet
//! in the grand final, which the progression engine may extend with a
//! reset match.

use crate::bracket_math::{lower_round_label, seeding_order, upper_round_label};
use crate::byes::compute_byes;
use crate::config::GenerateConfig;
use crate::drop_tables::{self, DropTable};
use crate::progression;
use crate::single_elim;
use podium_core::{
    BracketError, BracketGraph, BracketSection, BracketSections, EventFormat, Match, MatchId,
    NextRef, Round, SeedEntry, SlotRef, SlotSide,
};

fn side_index(side: SlotSide) -> usize {
    match side {
        SlotSide::A => 0,
        SlotSide::B => 1,
    }
}

pub(crate) fn generate(
    entries: &[SeedEntry],
    config: &GenerateConfig,
) -> Result<BracketGraph, BracketError> {
    let plan = compute_byes(entries.len());
    let bracket = plan.bracket_size;
    let table: &DropTable = drop_tables::for_bracket_size(bracket)
        .ok_or(BracketError::FieldTooLarge(entries.len()))?;

    let upper_rounds_count = bracket.trailing_zeros() as usize;
    let lower_sizes = table.round_sizes;
    let lower_rounds_count = lower_sizes.len();
    let upper_total = bracket - 1;

    let mut graph = BracketGraph::new(
        EventFormat::DoubleElimination,
        entries.to_vec(),
        BracketSections::DoubleElimination {
            upper: Vec::new(),
            lower: Vec::new(),
            grand_final: Vec::new(),
        },
    );
    graph.settings.series = config.series;
    graph.settings.grand_final_series = config.grand_final_series;
    graph.settings.bracket_reset = config.bracket_reset;
    graph.total_rounds = upper_rounds_count + lower_rounds_count + 1;

    // Precomputed arena positions: upper rounds first, then lower
    // rounds, then the grand final.
    let mut lower_offsets = Vec::with_capacity(lower_rounds_count);
    let mut acc = upper_total;
    for &n in lower_sizes {
        lower_offsets.push(acc);
        acc += n;
    }
    let lower_id = |round: usize, index: usize| MatchId((lower_offsets[round] + index) as u32);
    let gf_id = MatchId(acc as u32);

    // Upper bracket.
    let order = seeding_order(bracket);
    let mut upper_rounds: Vec<Round> = Vec::with_capacity(upper_rounds_count);
    let mut upper_ids: Vec<Vec<MatchId>> = Vec::with_capacity(upper_rounds_count);
    for r in 0..upper_rounds_count {
        let match_count = bracket >> (r + 1);
        let series = if r + 1 == upper_rounds_count {
            config.finals_series
        } else {
            config.series
        };
        let mut round = Round::new(r, upper_round_label(r, upper_rounds_count));
        let mut ids = Vec::with_capacity(match_count);
        for s in 0..match_count {
            let (slot_a, slot_b) = if r == 0 {
                (
                    single_elim::seed_slot(order[2 * s], entries),
                    single_elim::seed_slot(order[2 * s + 1], entries),
                )
            } else {
                (
                    SlotRef::Awaiting(upper_ids[r - 1][2 * s]),
                    SlotRef::Awaiting(upper_ids[r - 1][2 * s + 1]),
                )
            };
            let id = graph.alloc_match_id();
            graph.push_match(Match::new(
                id,
                r,
                s,
                BracketSection::Upper,
                series,
                slot_a,
                slot_b,
            ));
            round.match_ids.push(id);
            ids.push(id);
        }
        upper_rounds.push(round);
        upper_ids.push(ids);
    }

    // Who feeds each lower-bracket slot: droppers from the table plus
    // advancing lower winners.
    let mut sources: Vec<Vec<[Option<MatchId>; 2]>> = lower_sizes
        .iter()
        .map(|&n| vec![[None, None]; n])
        .collect();
    for (k, per_round) in table.drops.iter().enumerate() {
        for (m, slot) in per_round.iter().enumerate() {
            sources[slot.lower_round][slot.lower_match][side_index(slot.slot)] =
                Some(upper_ids[k][m]);
        }
    }
    for (j, &n) in lower_sizes.iter().enumerate() {
        for m in 0..n {
            if let Some(dest) = drop_tables::lower_advance(lower_sizes, j, m) {
                sources[dest.lower_round][dest.lower_match][side_index(dest.slot)] =
                    Some(lower_id(j, m));
            }
        }
    }

    // Lower bracket.
    let mut lower_rounds: Vec<Round> = Vec::with_capacity(lower_rounds_count);
    for (j, &n) in lower_sizes.iter().enumerate() {
        let series = if j + 1 == lower_rounds_count {
            config.finals_series
        } else {
            config.series
        };
        let mut round = Round::new(j, lower_round_label(j, lower_rounds_count));
        for m in 0..n {
            let feed = |side: usize| -> Result<SlotRef, BracketError> {
                sources[j][m][side]
                    .map(SlotRef::Awaiting)
                    .ok_or_else(|| {
                        BracketError::Integrity(format!(
                            "lower round {} match {} has an unfed slot",
                            j, m
                        ))
                    })
            };
            let slot_a = feed(0)?;
            let slot_b = feed(1)?;
            let id = graph.alloc_match_id();
            debug_assert_eq!(id, lower_id(j, m));
            graph.push_match(Match::new(
                id,
                j,
                m,
                BracketSection::Lower,
                series,
                slot_a,
                slot_b,
            ));
            round.match_ids.push(id);
        }
        lower_rounds.push(round);
    }

    // Grand final.
    let upper_final = upper_ids[upper_rounds_count - 1][0];
    let lower_final = lower_id(lower_rounds_count - 1, 0);
    {
        let id = graph.alloc_match_id();
        debug_assert_eq!(id, gf_id);
        graph.push_match(Match::new(
            id,
            0,
            0,
            BracketSection::GrandFinal,
            config.grand_final_series,
            SlotRef::Awaiting(upper_final),
            SlotRef::Awaiting(lower_final),
        ));
    }
    let mut gf_round = Round::new(0, "Grand Final");
    gf_round.match_ids.push(gf_id);

    // Links: upper winners forward, upper losers down, lower winners
    // forward; lower losers are out.
    for r in 0..upper_rounds_count {
        for (s, &id) in upper_ids[r].iter().enumerate() {
            let win = if r + 1 == upper_rounds_count {
                NextRef::new(gf_id, SlotSide::A)
            } else {
                let slot = if s % 2 == 0 { SlotSide::A } else { SlotSide::B };
                NextRef::new(upper_ids[r + 1][s / 2], slot)
            };
            let dest = table.drops[r][s];
            let loss = NextRef::new(lower_id(dest.lower_round, dest.lower_match), dest.slot);
            let m = graph.require_mut(id)?;
            m.next_match_on_win = Some(win);
            m.next_match_on_loss = Some(loss);
        }
    }
    for (j, &n) in lower_sizes.iter().enumerate() {
        for m in 0..n {
            let win = match drop_tables::lower_advance(lower_sizes, j, m) {
                Some(dest) => {
                    NextRef::new(lower_id(dest.lower_round, dest.lower_match), dest.slot)
                }
                None => NextRef::new(gf_id, SlotSide::B),
            };
            graph.require_mut(lower_id(j, m))?.next_match_on_win = Some(win);
        }
    }

    let BracketSections::DoubleElimination {
        upper,
        lower,
        grand_final,
    } = &mut graph.sections
    else {
        unreachable!("section layout fixed above");
    };
    *upper = upper_rounds;
    *lower = lower_rounds;
    grand_final.push(gf_round);

    progression::finalize_generation(&mut graph)?;
    Ok(graph)
}
