//! `BracketEngine`: the entry point the web layer (or any caller) uses.
//! Owns its store and runs each operation inside one transaction.

use crate::logic::{self, BracketView, RecordOutcome};
use crate::models::{
    BracketError, BracketMatch, MatchId, Participant, RosterEntry, Tournament, TournamentId,
    TournamentListing, User, UserId,
};
use crate::store::BracketStore;

/// Tournament and bracket operations over an injected store.
///
/// Authorization is the caller's job; the engine only enforces data integrity.
#[derive(Debug, Default)]
pub struct BracketEngine<S> {
    store: S,
}

impl<S: BracketStore> BracketEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn register_user(&self, name: &str, email: &str) -> Result<User, BracketError> {
        self.store
            .with_transaction(|tx| logic::register_user(tx, name, email))
    }

    pub fn user(&self, id: UserId) -> Result<User, BracketError> {
        self.store.with_transaction(|tx| logic::get_user(tx, id))
    }

    pub fn create_tournament(&self, name: &str, admin_id: UserId) -> Result<Tournament, BracketError> {
        self.store
            .with_transaction(|tx| logic::create_tournament(tx, name, admin_id))
    }

    pub fn tournaments(&self, limit: usize) -> Result<Vec<TournamentListing>, BracketError> {
        self.store
            .with_transaction(|tx| logic::list_tournaments(tx, limit))
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, BracketError> {
        self.store.with_transaction(|tx| logic::get_tournament(tx, id))
    }

    pub fn is_tournament_admin(
        &self,
        tournament_id: TournamentId,
        user_id: UserId,
    ) -> Result<bool, BracketError> {
        self.store
            .with_transaction(|tx| logic::is_tournament_admin(tx, tournament_id, user_id))
    }

    pub fn join_tournament(
        &self,
        tournament_id: TournamentId,
        user_id: UserId,
    ) -> Result<Participant, BracketError> {
        self.store
            .with_transaction(|tx| logic::join_tournament(tx, tournament_id, user_id))
    }

    pub fn roster(&self, tournament_id: TournamentId) -> Result<Vec<RosterEntry>, BracketError> {
        self.store
            .with_transaction(|tx| logic::roster(tx, tournament_id))
    }

    /// Generate the bracket from the current roster and move the tournament
    /// to InProgress. Nothing is persisted if any step fails.
    pub fn start_tournament(&self, tournament_id: TournamentId) -> Result<(), BracketError> {
        self.store
            .with_transaction(|tx| logic::start_tournament(tx, tournament_id))
    }

    pub fn get_match(&self, id: MatchId) -> Result<BracketMatch, BracketError> {
        self.store.with_transaction(|tx| logic::get_match(tx, id))
    }

    /// Record a result. Winner and successor slot are written together or not at all.
    pub fn record_winner(
        &self,
        match_id: MatchId,
        winner_id: UserId,
    ) -> Result<RecordOutcome, BracketError> {
        self.store
            .with_transaction(|tx| logic::record_winner(tx, match_id, winner_id))
    }

    pub fn complete_tournament(&self, tournament_id: TournamentId) -> Result<(), BracketError> {
        self.store
            .with_transaction(|tx| logic::complete_tournament(tx, tournament_id))
    }

    pub fn bracket(&self, tournament_id: TournamentId) -> Result<BracketView, BracketError> {
        self.store
            .with_transaction(|tx| logic::bracket_view(tx, tournament_id))
    }
}
