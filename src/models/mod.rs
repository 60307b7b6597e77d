//! Data structures for the registration form: leagues, players, form state.

mod player;
mod registration;

pub use player::{Player, PlayerField};
pub use registration::{
    parse_player_count, League, Registration, RegistrationError, TOTAL_TEAM_COST,
};
