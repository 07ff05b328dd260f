//! Read-only bracket projection for display, grouped by round.

use crate::logic::accounts::display_name;
use crate::logic::setup::get_tournament;
use crate::models::{
    BracketError, BracketMatch, MatchId, MatchState, NextLink, TournamentId, UserId,
};
use crate::store::StoreTx;
use serde::Serialize;

/// A player reference with their display name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Entrant {
    pub user_id: UserId,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchView {
    pub id: MatchId,
    pub round: u32,
    pub match_order: u32,
    pub player1: Option<Entrant>,
    pub player2: Option<Entrant>,
    pub winner: Option<Entrant>,
    pub next: Option<NextLink>,
    pub state: MatchState,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub round: u32,
    pub label: String,
    pub matches: Vec<MatchView>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketView {
    pub tournament_id: TournamentId,
    pub rounds: Vec<RoundView>,
    /// Winner of the final, once decided.
    pub champion: Option<Entrant>,
}

impl BracketView {
    /// All matches in bracket order.
    pub fn matches(&self) -> impl Iterator<Item = &MatchView> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    /// Match at (`round`, `match_order`), both 1-based.
    pub fn find(&self, round: u32, match_order: u32) -> Option<&MatchView> {
        self.matches()
            .find(|m| m.round == round && m.match_order == match_order)
    }
}

/// Heading for a round: Final, Semifinals, Quarterfinals, or "Round N".
pub fn round_label(round: u32, total_rounds: u32) -> String {
    if round == total_rounds {
        "Final".to_string()
    } else if round + 1 == total_rounds && total_rounds >= 3 {
        "Semifinals".to_string()
    } else if round + 2 == total_rounds && total_rounds >= 4 {
        "Quarterfinals".to_string()
    } else {
        format!("Round {}", round)
    }
}

fn entrant(tx: &mut dyn StoreTx, id: Option<UserId>) -> Result<Option<Entrant>, BracketError> {
    match id {
        Some(user_id) => Ok(Some(Entrant {
            user_id,
            name: display_name(tx, user_id)?,
        })),
        None => Ok(None),
    }
}

fn match_view(tx: &mut dyn StoreTx, m: &BracketMatch) -> Result<MatchView, BracketError> {
    Ok(MatchView {
        id: m.id,
        round: m.round,
        match_order: m.match_order,
        player1: entrant(tx, m.player1)?,
        player2: entrant(tx, m.player2)?,
        winner: entrant(tx, m.winner)?,
        next: m.next,
        state: m.state(),
    })
}

/// Bracket for a tournament. Empty while the tournament is still a draft.
pub fn bracket_view(
    tx: &mut dyn StoreTx,
    tournament_id: TournamentId,
) -> Result<BracketView, BracketError> {
    get_tournament(tx, tournament_id)?;
    let matches = tx.list_matches(tournament_id)?;
    let total_rounds = matches.iter().map(|m| m.round).max().unwrap_or(0);

    let mut rounds: Vec<RoundView> = Vec::with_capacity(total_rounds as usize);
    let mut champion = None;
    for m in &matches {
        if m.is_final() && m.winner.is_some() {
            champion = entrant(tx, m.winner)?;
        }
        let view = match_view(tx, m)?;
        match rounds.last_mut() {
            Some(r) if r.round == m.round => r.matches.push(view),
            _ => rounds.push(RoundView {
                round: m.round,
                label: round_label(m.round, total_rounds),
                matches: vec![view],
            }),
        }
    }

    Ok(BracketView {
        tournament_id,
        rounds,
        champion,
    })
}
