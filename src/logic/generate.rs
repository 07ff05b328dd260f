//! Single-elimination bracket generation.
//!
//! Round 1 pairs adjacent seeds (1v2, 3v4, ...). This keeps the pairing the
//! app has always shown; it is not standard seeding, which would keep the
//! top seeds apart until late rounds.

use crate::logic::setup::get_tournament;
use crate::models::{
    BracketError, BracketMatch, NextLink, Participant, Slot, TournamentId, TournamentStatus,
};
use crate::store::StoreTx;

/// Reject roster sizes a single-elimination bracket cannot hold.
pub fn validate_roster_size(count: usize) -> Result<(), BracketError> {
    if count < 2 {
        return Err(BracketError::InsufficientParticipants { count });
    }
    if !count.is_power_of_two() {
        return Err(BracketError::InvalidParticipantCount { count });
    }
    Ok(())
}

/// Order within round r+1 of the match fed by `match_order` in round r.
pub fn successor_order(match_order: u32) -> u32 {
    (match_order + 1) / 2
}

/// Build every match of the bracket for a seed-ordered roster.
///
/// Round r holds `n / 2^r` matches. Only round 1 gets players; later rounds
/// fill in as winners are recorded. Every match but the final links to its
/// successor in the next round.
pub fn plan_bracket(
    tournament_id: TournamentId,
    roster: &[Participant],
) -> Result<Vec<BracketMatch>, BracketError> {
    let size = roster.len();
    validate_roster_size(size)?;
    let num_rounds = size.trailing_zeros();

    let mut rounds: Vec<Vec<BracketMatch>> = Vec::with_capacity(num_rounds as usize);
    for round in 1..=num_rounds {
        let matches_in_round = (size >> round) as u32;
        let mut matches = Vec::with_capacity(matches_in_round as usize);
        for order in 1..=matches_in_round {
            let (player1, player2) = if round == 1 {
                let i = (order as usize - 1) * 2;
                (Some(roster[i].user_id), Some(roster[i + 1].user_id))
            } else {
                (None, None)
            };
            matches.push(BracketMatch::new(
                tournament_id,
                round,
                order,
                player1,
                player2,
            ));
        }
        rounds.push(matches);
    }

    // Link pass runs once every round exists.
    for r in 1..rounds.len() {
        let (earlier, later) = rounds.split_at_mut(r);
        let next_round = &later[0];
        for m in earlier[r - 1].iter_mut() {
            let successor = &next_round[(successor_order(m.match_order) - 1) as usize];
            m.next = Some(NextLink {
                match_id: successor.id,
                slot: Slot::for_order(m.match_order),
            });
        }
    }

    Ok(rounds.into_iter().flatten().collect())
}

/// Start the tournament: generate and persist the bracket, Draft -> InProgress.
pub fn start_tournament(
    tx: &mut dyn StoreTx,
    tournament_id: TournamentId,
) -> Result<(), BracketError> {
    let tournament = get_tournament(tx, tournament_id)?;
    if tournament.status != TournamentStatus::Draft {
        return Err(BracketError::InvalidStatus {
            expected: TournamentStatus::Draft,
            actual: tournament.status,
        });
    }
    let roster = tx.get_participants(tournament_id)?;
    let matches = plan_bracket(tournament_id, &roster)?;

    tx.set_tournament_status(tournament_id, TournamentStatus::InProgress)?;
    tx.create_matches(&matches)?;
    log::info!(
        "Started tournament {}: {} participants, {} matches over {} rounds",
        tournament_id,
        roster.len(),
        matches.len(),
        roster.len().trailing_zeros()
    );
    Ok(())
}
