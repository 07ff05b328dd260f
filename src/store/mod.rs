//! Storage collaborators. Every engine operation runs against a `StoreTx`
//! obtained from `BracketStore::with_transaction`.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    BracketError, BracketMatch, MatchId, Participant, Slot, Tournament, TournamentId,
    TournamentStatus, User, UserId,
};
use uuid::Uuid;

/// Infrastructure failures from the backing store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// Store cannot be used (e.g. poisoned lock, lost connection).
    Unavailable(String),
    /// A uniqueness constraint was violated.
    Conflict(String),
    /// Targeted update hit a row that does not exist.
    RowNotFound { table: &'static str, id: Uuid },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(reason) => write!(f, "store unavailable: {}", reason),
            StoreError::Conflict(reason) => write!(f, "constraint violated: {}", reason),
            StoreError::RowNotFound { table, id } => write!(f, "no row {} in {}", id, table),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait UserDirectory {
    fn insert_user(&mut self, user: &User) -> Result<(), StoreError>;
    fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

pub trait TournamentStore {
    fn insert_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError>;
    fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError>;
    /// Newest first.
    fn list_tournaments(&self, limit: usize) -> Result<Vec<Tournament>, StoreError>;
    fn set_tournament_status(
        &mut self,
        id: TournamentId,
        status: TournamentStatus,
    ) -> Result<(), StoreError>;
}

pub trait RosterStore {
    /// Ordered by seed ascending.
    fn get_participants(&self, tournament_id: TournamentId) -> Result<Vec<Participant>, StoreError>;
    /// Conflict if the user or the seed is already on the roster.
    fn insert_participant(&mut self, participant: &Participant) -> Result<(), StoreError>;
}

pub trait MatchStore {
    /// Conflict if any id already exists.
    fn create_matches(&mut self, matches: &[BracketMatch]) -> Result<(), StoreError>;
    fn get_match(&self, id: MatchId) -> Result<Option<BracketMatch>, StoreError>;
    /// Ordered by round, then match order.
    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<BracketMatch>, StoreError>;
    /// Writes only the winner field.
    fn set_match_winner(&mut self, id: MatchId, winner: UserId) -> Result<(), StoreError>;
    /// Writes only the player field for `slot`.
    fn set_player_slot(&mut self, id: MatchId, slot: Slot, player: UserId) -> Result<(), StoreError>;
}

/// Everything an operation may touch inside one transaction.
pub trait StoreTx: UserDirectory + TournamentStore + RosterStore + MatchStore {}

impl<T> StoreTx for T where T: UserDirectory + TournamentStore + RosterStore + MatchStore + ?Sized {}

/// A store that can run a unit of work atomically.
pub trait BracketStore: Send + Sync {
    /// Run `f` in a transaction: its writes are committed if it returns `Ok`
    /// and discarded if it returns `Err`. Transactions are serialized.
    fn with_transaction<T, F>(&self, f: F) -> Result<T, BracketError>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, BracketError>;
}
