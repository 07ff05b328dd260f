//! Bracket matches, player slots and the successor link between rounds.

use crate::models::tournament::TournamentId;
use crate::models::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bracket match.
pub type MatchId = Uuid;

/// One of the two player positions in a match. Serialized as 1 or 2.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    /// Slot in the successor match fed by the match at `match_order`:
    /// odd orders fill slot 1, even orders slot 2.
    pub fn for_order(match_order: u32) -> Self {
        if match_order % 2 == 1 {
            Slot::One
        } else {
            Slot::Two
        }
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        match slot {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            other => Err(format!("invalid slot {other}, expected 1 or 2")),
        }
    }
}

/// Forward link from a match to the match its winner advances into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NextLink {
    pub match_id: MatchId,
    pub slot: Slot,
}

/// Derived state of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// Both players still to be decided.
    Empty,
    /// At least one player known, no winner yet.
    Ready,
    /// Winner recorded. Terminal.
    Decided,
}

/// A single match in the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-based; round 1 is played first.
    pub round: u32,
    /// 1-based position within the round, top to bottom.
    pub match_order: u32,
    /// None while the slot is still TBD.
    pub player1: Option<UserId>,
    pub player2: Option<UserId>,
    /// None until decided.
    pub winner: Option<UserId>,
    /// None for the final.
    pub next: Option<NextLink>,
}

impl BracketMatch {
    pub fn new(
        tournament_id: TournamentId,
        round: u32,
        match_order: u32,
        player1: Option<UserId>,
        player2: Option<UserId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            match_order,
            player1,
            player2,
            winner: None,
            next: None,
        }
    }

    /// Player currently in `slot`.
    pub fn player(&self, slot: Slot) -> Option<UserId> {
        match slot {
            Slot::One => self.player1,
            Slot::Two => self.player2,
        }
    }

    /// True if `user` occupies either slot.
    pub fn has_player(&self, user: UserId) -> bool {
        self.player1 == Some(user) || self.player2 == Some(user)
    }

    pub fn is_final(&self) -> bool {
        self.next.is_none()
    }

    pub fn state(&self) -> MatchState {
        if self.winner.is_some() {
            MatchState::Decided
        } else if self.player1.is_some() || self.player2.is_some() {
            MatchState::Ready
        } else {
            MatchState::Empty
        }
    }
}
