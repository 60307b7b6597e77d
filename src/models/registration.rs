//! Registration form state: league choice, roster size, per-player contacts.

use crate::models::player::{Player, PlayerField};
use serde::{Deserialize, Serialize};

/// Fixed fee per team, split evenly across the declared players.
pub const TOTAL_TEAM_COST: f64 = 500.0;

/// The four divisions a team can register into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum League {
    LeagueA,
    LeagueB,
    LeagueC,
    LeagueD,
}

impl League {
    pub const ALL: [League; 4] = [
        League::LeagueA,
        League::LeagueB,
        League::LeagueC,
        League::LeagueD,
    ];

    /// Wire code used in API bodies and the payment URL.
    pub fn code(self) -> &'static str {
        match self {
            League::LeagueA => "league-a",
            League::LeagueB => "league-b",
            League::LeagueC => "league-c",
            League::LeagueD => "league-d",
        }
    }

    /// Name shown in the league selector.
    pub fn label(self) -> &'static str {
        match self {
            League::LeagueA => "League A - Premier Division",
            League::LeagueB => "League B - Championship Division",
            League::LeagueC => "League C - Amateur Division",
            League::LeagueD => "League D - Youth Division",
        }
    }
}

/// Validation failures, in the order the form checks them. Player numbers are 1-based.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistrationError {
    /// No league selected.
    LeagueRequired,
    /// Player count is zero.
    PlayersRequired,
    /// A player has an empty phone or email.
    MissingPlayerInfo { player: usize },
    /// A player's email does not look like local@domain.tld.
    InvalidEmail { player: usize },
    /// A player's phone number is malformed or too short.
    InvalidPhone { player: usize },
}

impl RegistrationError {
    /// Short headline for the notification shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            RegistrationError::LeagueRequired => "League Required",
            RegistrationError::PlayersRequired => "Players Required",
            RegistrationError::MissingPlayerInfo { .. } => "Player Information Required",
            RegistrationError::InvalidEmail { .. } => "Invalid Email",
            RegistrationError::InvalidPhone { .. } => "Invalid Phone Number",
        }
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::LeagueRequired => {
                write!(f, "Please select a league to participate in.")
            }
            RegistrationError::PlayersRequired => {
                write!(f, "Please specify the number of players.")
            }
            RegistrationError::MissingPlayerInfo { player } => {
                write!(f, "Please fill in all information for Player {}.", player)
            }
            RegistrationError::InvalidEmail { player } => {
                write!(f, "Please enter a valid email for Player {}.", player)
            }
            RegistrationError::InvalidPhone { player } => {
                write!(f, "Please enter a valid phone number for Player {}.", player)
            }
        }
    }
}

/// The form state for one registration session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub selected_league: Option<League>,
    pub number_of_players: usize,
    /// Always the same length as `number_of_players`; `set_number_of_players`
    /// keeps the two in sync.
    pub players: Vec<Player>,
    /// True only while a submission attempt is in flight.
    pub is_submitting: bool,
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}

impl Registration {
    /// Fresh form: no league, zero players.
    pub fn new() -> Self {
        Self {
            selected_league: None,
            number_of_players: 0,
            players: Vec::new(),
            is_submitting: false,
        }
    }

    pub fn set_league(&mut self, league: League) {
        self.selected_league = Some(league);
    }

    /// Set the player count and resize the roster to match, in one step.
    /// Existing entries keep their values by position; new slots start empty;
    /// shrinking drops trailing entries and their data is gone for good.
    pub fn set_number_of_players(&mut self, count: usize) {
        self.number_of_players = count;
        let mut players: Vec<Player> = (1..=count).map(Player::empty).collect();
        for (slot, old) in players.iter_mut().zip(self.players.iter()) {
            slot.phone_number = old.phone_number.clone();
            slot.email = old.email.clone();
        }
        self.players = players;
    }

    /// Edit one contact field of the player at `index` (0-based). The index
    /// must address a rendered row; anything else is a caller bug.
    pub fn update_player(&mut self, index: usize, field: PlayerField, value: impl Into<String>) {
        self.players[index].set_field(field, value);
    }

    /// Even split of the team fee, or zero while the count is unset.
    pub fn cost_per_player(&self) -> f64 {
        if self.number_of_players > 0 {
            TOTAL_TEAM_COST / self.number_of_players as f64
        } else {
            0.0
        }
    }
}

/// Normalize raw count input from a text field: trimmed integer parse,
/// anything unparseable (including negatives) becomes 0.
pub fn parse_player_count(input: &str) -> usize {
    input.trim().parse().unwrap_or(0)
}
