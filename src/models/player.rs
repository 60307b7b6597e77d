//! Player contact details collected per roster slot.

use serde::{Deserialize, Serialize};

/// Which of a player's two contact fields an edit targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerField {
    PhoneNumber,
    Email,
}

/// One roster slot on the form.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Positional rendering key (`player-1`, `player-2`, ...), not a business id.
    pub id: String,
    pub phone_number: String,
    pub email: String,
}

impl Player {
    /// Create an empty slot for the given 1-based position.
    pub fn empty(position: usize) -> Self {
        Self {
            id: format!("player-{position}"),
            phone_number: String::new(),
            email: String::new(),
        }
    }

    /// Set one contact field, leaving the other field and the id untouched.
    pub fn set_field(&mut self, field: PlayerField, value: impl Into<String>) {
        match field {
            PlayerField::PhoneNumber => self.phone_number = value.into(),
            PlayerField::Email => self.email = value.into(),
        }
    }
}
