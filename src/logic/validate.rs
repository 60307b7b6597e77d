//! Pre-submission checks: league chosen, roster declared, contacts well-formed.

use crate::models::{Registration, RegistrationError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// local@domain.tld shape: no whitespace, one '@', a dot somewhere after it.
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    /// Optional leading '+', then at least 10 characters of digits/spaces/hyphens/parentheses.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[\d\s\-\(\)]{10,}$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Check the whole form. The first failure wins; players are scanned in
/// roster order and reported by 1-based position.
pub fn validate_registration(form: &Registration) -> Result<(), RegistrationError> {
    if form.selected_league.is_none() {
        return Err(RegistrationError::LeagueRequired);
    }
    if form.number_of_players == 0 {
        return Err(RegistrationError::PlayersRequired);
    }
    for (i, player) in form.players.iter().enumerate() {
        let n = i + 1;
        if player.phone_number.is_empty() || player.email.is_empty() {
            return Err(RegistrationError::MissingPlayerInfo { player: n });
        }
        if !is_valid_email(&player.email) {
            return Err(RegistrationError::InvalidEmail { player: n });
        }
        if !is_valid_phone(&player.phone_number) {
            return Err(RegistrationError::InvalidPhone { player: n });
        }
    }
    Ok(())
}
