//! Form business logic: validation, notifications, and the submit flow.

mod notify;
mod submit;
mod validate;

pub use notify::{Notification, NotificationSink, Severity};
pub use submit::{
    payment_url, round_currency, submit, submit_with, RegistrationPayload, SubmitOutcome,
    INTAKE_DELAY, REDIRECT_DELAY,
};
pub use validate::{is_valid_email, is_valid_phone, validate_registration};
