//! Progression engine - applies match results and advances the graph
//!
//! Every public operation validates fully before touching the graph, so
//! a failed call leaves no observable mutation. The per-match version
//! counter is the sole concurrency control: submissions are a
//! compare-and-swap against it, and the losing side of a race gets
//! `StaleVersionError` instead of silently overwriting.

use crate::{standings, swiss};
use podium_core::{
    BracketError, BracketGraph, BracketSection, BracketSections, CompetitorId, EventFormat, Match,
    MatchId, MatchStatus, NextRef, Round, SlotRef, SlotSide, StandingRow,
};

/// What a successful submission changed.
#[derive(Clone, Debug)]
pub struct SubmitOutcome {
    /// The submitted match after mutation.
    pub updated: Match,
    /// Downstream matches that became ready to play.
    pub newly_ready: Vec<MatchId>,
    /// Matches created by this submission (lazily paired Swiss rounds,
    /// the grand-final reset).
    pub newly_created: Vec<MatchId>,
    /// Fresh standings for the league formats.
    pub standings: Option<Vec<StandingRow>>,
    pub is_complete: bool,
}

/// Record a decisive series result.
pub fn submit_result(
    graph: &mut BracketGraph,
    match_id: MatchId,
    score_a: u8,
    score_b: u8,
    expected_version: u64,
) -> Result<SubmitOutcome, BracketError> {
    validate_submission(graph, match_id, expected_version)?;
    {
        let m = graph.require(match_id)?;
        if !m.series.is_decisive(score_a, score_b) {
            return Err(BracketError::InvalidScore {
                score_a,
                score_b,
                series: m.series,
            });
        }
    }
    let winner_slot = if score_a > score_b {
        SlotSide::A
    } else {
        SlotSide::B
    };
    apply_terminal(
        graph,
        match_id,
        MatchStatus::Completed,
        winner_slot,
        score_a,
        score_b,
    )
}

/// Record a forfeit: the non-forfeiting side wins without a score line.
pub fn submit_forfeit(
    graph: &mut BracketGraph,
    match_id: MatchId,
    forfeiting_side: SlotSide,
    expected_version: u64,
) -> Result<SubmitOutcome, BracketError> {
    validate_submission(graph, match_id, expected_version)?;
    apply_terminal(
        graph,
        match_id,
        MatchStatus::Forfeited,
        forfeiting_side.other(),
        0,
        0,
    )
}

/// Mark a ready match as live (score entry about to begin).
pub fn start_match(
    graph: &mut BracketGraph,
    match_id: MatchId,
    expected_version: u64,
) -> Result<Match, BracketError> {
    {
        let m = graph.require(match_id)?;
        if m.version != expected_version {
            return Err(BracketError::StaleVersion {
                match_id,
                expected: expected_version,
                current: m.version,
            });
        }
        if m.status != MatchStatus::Ready {
            return Err(BracketError::InvalidStatusTransition {
                match_id,
                status: m.status,
            });
        }
    }
    let m = graph.require_mut(match_id)?;
    m.status = MatchStatus::Live;
    m.version += 1;
    Ok(m.clone())
}

/// All checks for a submission, before any mutation: existence, version
/// compare, status, and the integrity of both downstream links.
fn validate_submission(
    graph: &BracketGraph,
    match_id: MatchId,
    expected_version: u64,
) -> Result<(), BracketError> {
    let m = graph.require(match_id)?;
    if m.version != expected_version {
        return Err(BracketError::StaleVersion {
            match_id,
            expected: expected_version,
            current: m.version,
        });
    }
    if !m.status.accepts_result() {
        return Err(BracketError::InvalidStatusTransition {
            match_id,
            status: m.status,
        });
    }
    for link in [m.next_match_on_win, m.next_match_on_loss]
        .into_iter()
        .flatten()
    {
        let target = graph.get(link.match_id).ok_or_else(|| {
            BracketError::Integrity(format!(
                "match {} links to missing match {}",
                match_id, link.match_id
            ))
        })?;
        let awaits_us = matches!(target.slot(link.slot), SlotRef::Awaiting(id) if id == match_id);
        if !awaits_us {
            return Err(BracketError::Integrity(format!(
                "slot {:?} of match {} does not await match {}",
                link.slot, link.match_id, match_id
            )));
        }
    }
    Ok(())
}

fn apply_terminal(
    graph: &mut BracketGraph,
    match_id: MatchId,
    status: MatchStatus,
    winner_slot: SlotSide,
    score_a: u8,
    score_b: u8,
) -> Result<SubmitOutcome, BracketError> {
    {
        let m = graph.require_mut(match_id)?;
        m.score_a = score_a;
        m.score_b = score_b;
        m.status = status;
        m.winner_slot = Some(winner_slot);
        m.version += 1;
    }

    let mut newly_ready = Vec::new();
    let mut newly_created = Vec::new();
    propagate(graph, match_id, &mut newly_ready)?;
    match graph.format {
        EventFormat::DoubleElimination => {
            maybe_create_reset(graph, match_id, &mut newly_ready, &mut newly_created)?
        }
        EventFormat::Swiss => {
            maybe_pair_next_swiss_round(graph, &mut newly_ready, &mut newly_created)?
        }
        _ => {}
    }
    refresh_completion(graph);

    let standings = match graph.format {
        EventFormat::Swiss | EventFormat::RoundRobin => Some(standings::recompute(graph)),
        _ => None,
    };
    Ok(SubmitOutcome {
        updated: graph.require(match_id)?.clone(),
        newly_ready,
        newly_created,
        standings,
        is_complete: graph.is_complete,
    })
}

/// Push a terminal match's winner and loser into their linked slots.
fn propagate(
    graph: &mut BracketGraph,
    match_id: MatchId,
    newly_ready: &mut Vec<MatchId>,
) -> Result<(), BracketError> {
    let (win_link, loss_link, winner, loser) = {
        let m = graph.require(match_id)?;
        (m.next_match_on_win, m.next_match_on_loss, m.winner(), m.loser())
    };
    if let Some(link) = win_link {
        fill_slot(graph, link, winner, newly_ready)?;
    }
    if let Some(link) = loss_link {
        fill_slot(graph, link, loser, newly_ready)?;
    }
    Ok(())
}

/// Resolve one awaiting slot. A missing occupant (the source match was
/// a walkover with no loser) turns the slot into a bye, which may
/// cascade further walkovers downstream.
fn fill_slot(
    graph: &mut BracketGraph,
    link: NextRef,
    occupant: Option<CompetitorId>,
    newly_ready: &mut Vec<MatchId>,
) -> Result<(), BracketError> {
    {
        let target = graph.require_mut(link.match_id)?;
        *target.slot_mut(link.slot) = match occupant {
            Some(id) => SlotRef::Competitor(id),
            None => SlotRef::Bye,
        };
        target.refresh_readiness();
    }
    let (status, walkover) = {
        let target = graph.require(link.match_id)?;
        let walkover = target.is_bye_match() || (target.slot_a.is_bye() && target.slot_b.is_bye());
        (target.status, walkover)
    };
    if status == MatchStatus::Ready {
        newly_ready.push(link.match_id);
    } else if walkover {
        auto_advance(graph, link.match_id, newly_ready)?;
    }
    Ok(())
}

/// Complete a walkover without a result submission and keep advancing.
/// The winner is whichever side holds a competitor; a double bye
/// advances nothing but still resolves its own downstream slots.
pub(crate) fn auto_advance(
    graph: &mut BracketGraph,
    match_id: MatchId,
    newly_ready: &mut Vec<MatchId>,
) -> Result<(), BracketError> {
    {
        let m = graph.require_mut(match_id)?;
        m.status = MatchStatus::Completed;
        m.winner_slot = if m.slot_a.is_resolved() {
            Some(SlotSide::A)
        } else if m.slot_b.is_resolved() {
            Some(SlotSide::B)
        } else {
            None
        };
    }
    propagate(graph, match_id, newly_ready)
}

/// Post-generation pass shared by the elimination generators: promote
/// fully seeded matches to ready, then run every round-one walkover.
pub(crate) fn finalize_generation(graph: &mut BracketGraph) -> Result<(), BracketError> {
    for m in &mut graph.matches {
        m.refresh_readiness();
    }
    let bye_ids: Vec<MatchId> = graph
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Pending && m.is_bye_match())
        .map(|m| m.id)
        .collect();
    let mut newly_ready = Vec::new();
    for id in bye_ids {
        auto_advance(graph, id, &mut newly_ready)?;
    }
    Ok(())
}

/// Create the decisive second grand final when the lower-bracket
/// finalist takes game one and resets are enabled.
fn maybe_create_reset(
    graph: &mut BracketGraph,
    match_id: MatchId,
    newly_ready: &mut Vec<MatchId>,
    newly_created: &mut Vec<MatchId>,
) -> Result<(), BracketError> {
    let gf1_id = {
        let BracketSections::DoubleElimination { grand_final, .. } = &graph.sections else {
            return Ok(());
        };
        if grand_final.len() != 1 {
            return Ok(());
        }
        grand_final[0].match_ids[0]
    };
    if match_id != gf1_id {
        return Ok(());
    }
    let (slot_a, slot_b, lower_side_won) = {
        let gf1 = graph.require(gf1_id)?;
        (
            gf1.slot_a,
            gf1.slot_b,
            gf1.winner_slot == Some(SlotSide::B),
        )
    };
    if !lower_side_won || !graph.settings.bracket_reset {
        return Ok(());
    }

    let series = graph.settings.grand_final_series;
    let id = graph.alloc_match_id();
    let mut reset = Match::new(id, 1, 0, BracketSection::GrandFinal, series, slot_a, slot_b);
    reset.status = MatchStatus::Ready;
    graph.push_match(reset);

    let BracketSections::DoubleElimination { grand_final, .. } = &mut graph.sections else {
        unreachable!("section layout checked above");
    };
    let mut round = Round::new(1, "Grand Final Reset");
    round.match_ids.push(id);
    grand_final.push(round);
    graph.total_rounds += 1;

    newly_created.push(id);
    newly_ready.push(id);
    Ok(())
}

/// Pair the next Swiss round once the current one has finished.
fn maybe_pair_next_swiss_round(
    graph: &mut BracketGraph,
    newly_ready: &mut Vec<MatchId>,
    newly_created: &mut Vec<MatchId>,
) -> Result<(), BracketError> {
    let finished = {
        let BracketSections::League { rounds } = &graph.sections else {
            return Ok(());
        };
        if rounds.len() >= graph.total_rounds {
            return Ok(());
        }
        match rounds.last() {
            Some(last) => graph.round_finished(last),
            None => false,
        }
    };
    if !finished {
        return Ok(());
    }
    let created = swiss::pair_next_round(graph)?;
    for &id in &created {
        if graph.require(id)?.status == MatchStatus::Ready {
            newly_ready.push(id);
        }
    }
    newly_created.extend(created);
    Ok(())
}

/// Re-derive the terminal state of the whole bracket.
fn refresh_completion(graph: &mut BracketGraph) {
    let complete = match &graph.sections {
        BracketSections::SingleElimination { rounds } => rounds
            .last()
            .map_or(false, |r| graph.round_finished(r)),
        // The reset round, if owed, was appended before this check, so
        // the last grand-final round finishing is terminal either way.
        BracketSections::DoubleElimination { grand_final, .. } => grand_final
            .last()
            .map_or(false, |r| graph.round_finished(r)),
        BracketSections::League { rounds } => {
            rounds.len() >= graph.total_rounds
                && rounds.iter().all(|r| graph.round_finished(r))
        }
    };
    graph.is_complete = complete;
}
