//! Tournament, TournamentStatus and roster entries.

use crate::models::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament. Only moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Accepting participants; no bracket yet.
    #[default]
    Draft,
    /// Bracket generated, results being recorded.
    InProgress,
    /// Final decided and the tournament closed.
    Completed,
}

impl TournamentStatus {
    /// Whether `self -> next` is one of the allowed forward transitions.
    pub fn can_advance_to(self, next: TournamentStatus) -> bool {
        use TournamentStatus::*;
        matches!((self, next), (Draft, InProgress) | (InProgress, Completed))
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Draft => write!(f, "draft"),
            TournamentStatus::InProgress => write!(f, "in_progress"),
            TournamentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A single-elimination tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub admin_id: UserId,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Draft status.
    pub fn new(name: impl Into<String>, admin_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            admin_id,
            status: TournamentStatus::Draft,
            created_at: Utc::now(),
        }
    }
}

/// Tournament plus the admin's display name (for listings).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentListing {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub admin_name: Option<String>,
}

/// One roster entry. Seeds are 1-based and follow join order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub tournament_id: TournamentId,
    pub user_id: UserId,
    pub seed: u32,
    pub joined_at: DateTime<Utc>,
}

/// Roster entry with the participant's display name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub seed: u32,
}
