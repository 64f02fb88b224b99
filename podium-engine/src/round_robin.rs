//! Round-robin generator (circle method)
//!
//! Competitor one stays fixed while the rest rotate around it, so every
//! unordered pair meets exactly once. Odd fields get a phantom entrant;
//! whoever draws the phantom simply sits the round out, and the
//! rotation spreads the sit-outs evenly.

use crate::config::GenerateConfig;
use podium_core::{
    BracketError, BracketGraph, BracketSection, BracketSections, EventFormat, Match, MatchStatus,
    Round, SeedEntry, SlotRef,
};

pub(crate) fn generate(
    entries: &[SeedEntry],
    config: &GenerateConfig,
) -> Result<BracketGraph, BracketError> {
    let n = entries.len();
    let mut graph = BracketGraph::new(
        EventFormat::RoundRobin,
        entries.to_vec(),
        BracketSections::League { rounds: Vec::new() },
    );
    graph.settings.series = config.series;
    graph.settings.bracket_reset = false;

    let mut arrangement: Vec<Option<usize>> = (0..n).map(Some).collect();
    if n % 2 == 1 {
        arrangement.push(None);
    }
    let width = arrangement.len();
    let round_count = width - 1;
    graph.total_rounds = round_count;

    let mut rounds = Vec::with_capacity(round_count);
    for r in 0..round_count {
        let mut round = Round::new(r, format!("Round {}", r + 1));
        let mut slot = 0;
        for i in 0..width / 2 {
            if let (Some(x), Some(y)) = (arrangement[i], arrangement[width - 1 - i]) {
                let id = graph.alloc_match_id();
                let mut m = Match::new(
                    id,
                    r,
                    slot,
                    BracketSection::RoundRobin,
                    config.series,
                    SlotRef::Competitor(entries[x].competitor_id),
                    SlotRef::Competitor(entries[y].competitor_id),
                );
                m.status = MatchStatus::Ready;
                graph.push_match(m);
                round.match_ids.push(id);
                slot += 1;
            }
        }
        rounds.push(round);
        // Keep the anchor, rotate everyone else one step.
        arrangement[1..].rotate_right(1);
    }

    let BracketSections::League { rounds: dest } = &mut graph.sections else {
        unreachable!("section layout fixed above");
    };
    *dest = rounds;
    Ok(graph)
}
