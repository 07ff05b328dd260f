//! Draft phase: creating tournaments and building the roster.

use crate::logic::accounts::{display_name, get_user};
use crate::models::{
    BracketError, Participant, RosterEntry, Tournament, TournamentId, TournamentListing,
    TournamentStatus, UserId,
};
use crate::store::StoreTx;
use chrono::Utc;

/// Create a tournament in Draft status administered by `admin_id`.
pub fn create_tournament(
    tx: &mut dyn StoreTx,
    name: &str,
    admin_id: UserId,
) -> Result<Tournament, BracketError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BracketError::EmptyName);
    }
    get_user(tx, admin_id)?;
    let tournament = Tournament::new(name, admin_id);
    tx.insert_tournament(&tournament)?;
    log::info!("Created tournament {} ({})", tournament.name, tournament.id);
    Ok(tournament)
}

/// Newest tournaments first, with the admin's name.
pub fn list_tournaments(
    tx: &mut dyn StoreTx,
    limit: usize,
) -> Result<Vec<TournamentListing>, BracketError> {
    let tournaments = tx.list_tournaments(limit)?;
    let mut out = Vec::with_capacity(tournaments.len());
    for tournament in tournaments {
        let admin_name = display_name(tx, tournament.admin_id)?;
        out.push(TournamentListing {
            tournament,
            admin_name,
        });
    }
    Ok(out)
}

pub fn get_tournament(tx: &mut dyn StoreTx, id: TournamentId) -> Result<Tournament, BracketError> {
    tx.get_tournament(id)?
        .ok_or(BracketError::TournamentNotFound(id))
}

/// Whether `user_id` administers the tournament. Unknown tournaments have no admin.
pub fn is_tournament_admin(
    tx: &mut dyn StoreTx,
    tournament_id: TournamentId,
    user_id: UserId,
) -> Result<bool, BracketError> {
    Ok(tx
        .get_tournament(tournament_id)?
        .is_some_and(|t| t.admin_id == user_id))
}

/// Add `user_id` to the roster with the next seed. Joining twice returns the existing entry.
pub fn join_tournament(
    tx: &mut dyn StoreTx,
    tournament_id: TournamentId,
    user_id: UserId,
) -> Result<Participant, BracketError> {
    let tournament = get_tournament(tx, tournament_id)?;
    if tournament.status != TournamentStatus::Draft {
        return Err(BracketError::InvalidStatus {
            expected: TournamentStatus::Draft,
            actual: tournament.status,
        });
    }
    get_user(tx, user_id)?;
    let roster = tx.get_participants(tournament_id)?;
    if let Some(existing) = roster.iter().find(|p| p.user_id == user_id) {
        return Ok(existing.clone());
    }
    let participant = Participant {
        tournament_id,
        user_id,
        seed: roster.len() as u32 + 1,
        joined_at: Utc::now(),
    };
    tx.insert_participant(&participant)?;
    log::info!(
        "User {} joined tournament {} as seed {}",
        user_id,
        tournament_id,
        participant.seed
    );
    Ok(participant)
}

/// Seed-ordered roster with display names.
pub fn roster(
    tx: &mut dyn StoreTx,
    tournament_id: TournamentId,
) -> Result<Vec<RosterEntry>, BracketError> {
    get_tournament(tx, tournament_id)?;
    let participants = tx.get_participants(tournament_id)?;
    let mut out = Vec::with_capacity(participants.len());
    for p in participants {
        out.push(RosterEntry {
            user_name: display_name(tx, p.user_id)?,
            user_id: p.user_id,
            seed: p.seed,
        });
    }
    Ok(out)
}
