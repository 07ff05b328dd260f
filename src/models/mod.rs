//! Data structures for brackets: users, tournaments, roster entries, matches, errors.

mod bracket;
mod error;
mod tournament;
mod user;

pub use bracket::{BracketMatch, MatchId, MatchState, NextLink, Slot};
pub use error::BracketError;
pub use tournament::{
    Participant, RosterEntry, Tournament, TournamentId, TournamentListing, TournamentStatus,
};
pub use user::{User, UserId};
