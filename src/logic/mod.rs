//! Bracket business logic: accounts, setup, generation, advancement, views.
//! Every function works against an explicit store transaction.

mod accounts;
mod advance;
mod generate;
mod setup;
mod view;

pub use accounts::{get_user, register_user};
pub use advance::{complete_tournament, get_match, record_winner, RecordOutcome};
pub use generate::{plan_bracket, start_tournament, successor_order, validate_roster_size};
pub use setup::{
    create_tournament, get_tournament, is_tournament_admin, join_tournament, list_tournaments,
    roster,
};
pub use view::{bracket_view, round_label, BracketView, Entrant, MatchView, RoundView};
