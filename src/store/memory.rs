//! In-memory store: all tables behind one RwLock, copy-on-write transactions.

use super::{
    BracketStore, MatchStore, RosterStore, StoreError, StoreTx, TournamentStore, UserDirectory,
};
use crate::models::{
    BracketError, BracketMatch, MatchId, Participant, Slot, Tournament, TournamentId,
    TournamentStatus, User, UserId,
};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Clone, Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    tournaments: HashMap<TournamentId, Tournament>,
    /// Per tournament, kept sorted by seed.
    participants: HashMap<TournamentId, Vec<Participant>>,
    matches: HashMap<MatchId, BracketMatch>,
}

/// Store keeping everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BracketStore for MemoryStore {
    fn with_transaction<T, F>(&self, f: F) -> Result<T, BracketError>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, BracketError>,
    {
        let mut guard = self
            .tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        let (out, staged) = {
            let mut tx = MemoryTx {
                base: &*guard,
                staged: None,
            };
            let out = f(&mut tx)?;
            (out, tx.staged)
        };
        if let Some(tables) = staged {
            *guard = tables;
        }
        Ok(out)
    }
}

/// Reads see the staged copy once the transaction has written anything.
struct MemoryTx<'a> {
    base: &'a Tables,
    staged: Option<Tables>,
}

impl MemoryTx<'_> {
    fn view(&self) -> &Tables {
        self.staged.as_ref().unwrap_or(self.base)
    }

    fn stage(&mut self) -> &mut Tables {
        let base = self.base;
        self.staged.get_or_insert_with(|| base.clone())
    }

    fn match_mut(&mut self, id: MatchId) -> Result<&mut BracketMatch, StoreError> {
        self.stage()
            .matches
            .get_mut(&id)
            .ok_or(StoreError::RowNotFound { table: "bracket_matches", id })
    }
}

impl UserDirectory for MemoryTx<'_> {
    fn insert_user(&mut self, user: &User) -> Result<(), StoreError> {
        let view = self.view();
        if view.users.contains_key(&user.id) {
            return Err(StoreError::Conflict(format!("user {} exists", user.id)));
        }
        if view.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!("email {} taken", user.email)));
        }
        self.stage().users.insert(user.id, user.clone());
        Ok(())
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.view().users.get(&id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.view().users.values().find(|u| u.email == email).cloned())
    }
}

impl TournamentStore for MemoryTx<'_> {
    fn insert_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        if self.view().tournaments.contains_key(&tournament.id) {
            return Err(StoreError::Conflict(format!(
                "tournament {} exists",
                tournament.id
            )));
        }
        self.stage()
            .tournaments
            .insert(tournament.id, tournament.clone());
        Ok(())
    }

    fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        Ok(self.view().tournaments.get(&id).cloned())
    }

    fn list_tournaments(&self, limit: usize) -> Result<Vec<Tournament>, StoreError> {
        let mut all: Vec<Tournament> = self.view().tournaments.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        Ok(all)
    }

    fn set_tournament_status(
        &mut self,
        id: TournamentId,
        status: TournamentStatus,
    ) -> Result<(), StoreError> {
        let t = self
            .stage()
            .tournaments
            .get_mut(&id)
            .ok_or(StoreError::RowNotFound { table: "tournaments", id })?;
        t.status = status;
        Ok(())
    }
}

impl RosterStore for MemoryTx<'_> {
    fn get_participants(&self, tournament_id: TournamentId) -> Result<Vec<Participant>, StoreError> {
        Ok(self
            .view()
            .participants
            .get(&tournament_id)
            .cloned()
            .unwrap_or_default())
    }

    fn insert_participant(&mut self, participant: &Participant) -> Result<(), StoreError> {
        let roster = self
            .stage()
            .participants
            .entry(participant.tournament_id)
            .or_default();
        if roster
            .iter()
            .any(|p| p.user_id == participant.user_id || p.seed == participant.seed)
        {
            return Err(StoreError::Conflict(format!(
                "participant {} or seed {} already on roster",
                participant.user_id, participant.seed
            )));
        }
        roster.push(participant.clone());
        roster.sort_by_key(|p| p.seed);
        Ok(())
    }
}

impl MatchStore for MemoryTx<'_> {
    fn create_matches(&mut self, matches: &[BracketMatch]) -> Result<(), StoreError> {
        if let Some(dup) = matches
            .iter()
            .find(|m| self.view().matches.contains_key(&m.id))
        {
            return Err(StoreError::Conflict(format!("match {} exists", dup.id)));
        }
        let table = &mut self.stage().matches;
        for m in matches {
            table.insert(m.id, m.clone());
        }
        Ok(())
    }

    fn get_match(&self, id: MatchId) -> Result<Option<BracketMatch>, StoreError> {
        Ok(self.view().matches.get(&id).cloned())
    }

    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<BracketMatch>, StoreError> {
        let mut out: Vec<BracketMatch> = self
            .view()
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        out.sort_by_key(|m| (m.round, m.match_order));
        Ok(out)
    }

    fn set_match_winner(&mut self, id: MatchId, winner: UserId) -> Result<(), StoreError> {
        self.match_mut(id)?.winner = Some(winner);
        Ok(())
    }

    fn set_player_slot(&mut self, id: MatchId, slot: Slot, player: UserId) -> Result<(), StoreError> {
        let m = self.match_mut(id)?;
        match slot {
            Slot::One => m.player1 = Some(player),
            Slot::Two => m.player2 = Some(player),
        }
        Ok(())
    }
}
