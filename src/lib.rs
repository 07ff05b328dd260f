//! Pickleball tournaments: single-elimination bracket engine, storage and web API.

pub mod config;
pub mod engine;
pub mod logic;
pub mod models;
pub mod store;
pub mod web;

pub use config::ServerConfig;
pub use engine::BracketEngine;
pub use logic::{
    plan_bracket, round_label, validate_roster_size, BracketView, Entrant, MatchView,
    RecordOutcome, RoundView,
};
pub use models::{
    BracketError, BracketMatch, MatchId, MatchState, NextLink, Participant, RosterEntry, Slot,
    Tournament, TournamentId, TournamentListing, TournamentStatus, User, UserId,
};
pub use store::{BracketStore, MemoryStore, StoreError, StoreTx};
