//! Team registration web app: library with the form model and submission logic.

pub mod logic;
pub mod models;

pub use logic::{
    is_valid_email, is_valid_phone, payment_url, round_currency, submit, submit_with,
    validate_registration, Notification, NotificationSink, RegistrationPayload, Severity,
    SubmitOutcome, INTAKE_DELAY, REDIRECT_DELAY,
};
pub use models::{
    parse_player_count, League, Player, PlayerField, Registration, RegistrationError,
    TOTAL_TEAM_COST,
};
