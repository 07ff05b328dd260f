//! Caller-facing errors for bracket operations.

use crate::models::bracket::MatchId;
use crate::models::tournament::{TournamentId, TournamentStatus};
use crate::models::user::UserId;
use crate::store::StoreError;

/// Errors that can occur during tournament and bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Fewer than 2 participants.
    InsufficientParticipants { count: usize },
    /// Participant count is not a power of two.
    InvalidParticipantCount { count: usize },
    MatchNotFound(MatchId),
    /// Winner is neither player of the match.
    InvalidWinner { match_id: MatchId, winner: UserId },
    /// The match already has a different winner.
    WinnerAlreadyDecided { match_id: MatchId, winner: UserId },
    TournamentNotFound(TournamentId),
    UserNotFound(UserId),
    /// Tournament is not in the status this action requires.
    InvalidStatus {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },
    /// Name (or email) is blank.
    EmptyName,
    /// The final match has no winner yet.
    FinalUndecided(TournamentId),
    /// Storage failure, passed through unchanged.
    Store(StoreError),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InsufficientParticipants { count } => {
                write!(f, "Need at least 2 participants (have {})", count)
            }
            BracketError::InvalidParticipantCount { count } => write!(
                f,
                "Participants must be a power of 2 (2, 4, 8, 16, 32, ...), have {}",
                count
            ),
            BracketError::MatchNotFound(_) => write!(f, "Match not found"),
            BracketError::InvalidWinner { .. } => write!(f, "Winner must be a player in this match"),
            BracketError::WinnerAlreadyDecided { .. } => {
                write!(f, "A different winner was already recorded for this match")
            }
            BracketError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            BracketError::UserNotFound(_) => write!(f, "User not found"),
            BracketError::InvalidStatus { expected, actual } => write!(
                f,
                "Tournament must be {} for this action (is {})",
                expected, actual
            ),
            BracketError::EmptyName => write!(f, "Name must not be empty"),
            BracketError::FinalUndecided(_) => write!(f, "The final has not been decided yet"),
            BracketError::Store(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for BracketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BracketError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for BracketError {
    fn from(e: StoreError) -> Self {
        BracketError::Store(e)
    }
}

impl BracketError {
    /// True for errors caused by an unknown id.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BracketError::MatchNotFound(_)
                | BracketError::TournamentNotFound(_)
                | BracketError::UserNotFound(_)
        )
    }
}
