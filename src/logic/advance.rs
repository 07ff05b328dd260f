//! Recording results and moving winners through the bracket.

use crate::logic::setup::get_tournament;
use crate::models::{
    BracketError, BracketMatch, MatchId, Slot, TournamentId, TournamentStatus, UserId,
};
use crate::store::StoreTx;
use serde::Serialize;

/// What a recorded result did to the bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Winner moved into `slot` of the successor match.
    Advanced { next_match_id: MatchId, slot: Slot },
    /// The final was decided; the bracket is finished.
    BracketDecided {
        tournament_id: TournamentId,
        champion: UserId,
    },
    /// Same winner was already recorded; nothing written.
    Unchanged,
}

pub fn get_match(tx: &mut dyn StoreTx, id: MatchId) -> Result<BracketMatch, BracketError> {
    tx.get_match(id)?.ok_or(BracketError::MatchNotFound(id))
}

/// Record `winner_id` for the match and advance them to the successor slot.
///
/// The winner must be one of the match's players. A decided match accepts the
/// same winner again as a no-op and rejects a different one.
pub fn record_winner(
    tx: &mut dyn StoreTx,
    match_id: MatchId,
    winner_id: UserId,
) -> Result<RecordOutcome, BracketError> {
    let m = get_match(tx, match_id)?;
    if !m.has_player(winner_id) {
        log::warn!("Rejected winner {} for match {}: not a player", winner_id, match_id);
        return Err(BracketError::InvalidWinner {
            match_id,
            winner: winner_id,
        });
    }
    match m.winner {
        Some(existing) if existing == winner_id => return Ok(RecordOutcome::Unchanged),
        Some(existing) => {
            log::warn!(
                "Rejected winner {} for match {}: already decided for {}",
                winner_id,
                match_id,
                existing
            );
            return Err(BracketError::WinnerAlreadyDecided {
                match_id,
                winner: existing,
            });
        }
        None => {}
    }

    tx.set_match_winner(match_id, winner_id)?;
    log::debug!(
        "Match {} (round {}, order {}) won by {}",
        match_id,
        m.round,
        m.match_order,
        winner_id
    );

    match m.next {
        Some(link) => {
            tx.set_player_slot(link.match_id, link.slot, winner_id)?;
            log::debug!(
                "Advanced {} to match {} slot {}",
                winner_id,
                link.match_id,
                u8::from(link.slot)
            );
            Ok(RecordOutcome::Advanced {
                next_match_id: link.match_id,
                slot: link.slot,
            })
        }
        None => {
            log::info!(
                "Final of tournament {} decided: champion {}",
                m.tournament_id,
                winner_id
            );
            Ok(RecordOutcome::BracketDecided {
                tournament_id: m.tournament_id,
                champion: winner_id,
            })
        }
    }
}

/// Close an in-progress tournament whose final has been decided.
pub fn complete_tournament(
    tx: &mut dyn StoreTx,
    tournament_id: TournamentId,
) -> Result<(), BracketError> {
    let tournament = get_tournament(tx, tournament_id)?;
    if !tournament.status.can_advance_to(TournamentStatus::Completed) {
        return Err(BracketError::InvalidStatus {
            expected: TournamentStatus::InProgress,
            actual: tournament.status,
        });
    }
    let decided = tx
        .list_matches(tournament_id)?
        .iter()
        .any(|m| m.is_final() && m.winner.is_some());
    if !decided {
        return Err(BracketError::FinalUndecided(tournament_id));
    }
    tx.set_tournament_status(tournament_id, TournamentStatus::Completed)?;
    log::info!("Completed tournament {}", tournament_id);
    Ok(())
}
