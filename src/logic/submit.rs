//! Submission flow: validate, run the payment-intake side effect, hand back
//! the redirect target.

use crate::logic::notify::{Notification, NotificationSink};
use crate::logic::validate::validate_registration;
use crate::models::{Player, Registration, TOTAL_TEAM_COST};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Simulated payment-intake latency (stands in for a real network call).
pub const INTAKE_DELAY: Duration = Duration::from_millis(1000);
/// How long the client should show the success message before navigating.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// What gets handed to the payment step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub league: String,
    pub number_of_players: usize,
    pub players: Vec<Player>,
    pub total_cost: f64,
    /// Even split, rounded to 2 decimals.
    pub cost_per_player: f64,
}

impl RegistrationPayload {
    /// Snapshot the form at submission time. Later edits to the form do not
    /// affect a payload that has already been captured.
    pub fn capture(form: &Registration) -> Self {
        Self {
            league: form
                .selected_league
                .map(|l| l.code().to_string())
                .unwrap_or_default(),
            number_of_players: form.number_of_players,
            players: form.players.clone(),
            total_cost: TOTAL_TEAM_COST,
            cost_per_player: round_currency(form.cost_per_player()),
        }
    }
}

/// Round to 2 decimal places, ties away from zero (currency rounding).
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// The payment endpoint the client navigates to after the success message.
pub fn payment_url(payload: &RegistrationPayload) -> String {
    format!(
        "/api/payment?amount={:.2}&league={}&players={}",
        payload.cost_per_player,
        urlencoding::encode(&payload.league),
        payload.number_of_players
    )
}

/// Everything the caller needs to finish the flow after a successful submit.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitOutcome {
    pub payload: RegistrationPayload,
    pub payment_url: String,
    /// Navigate after this long.
    pub redirect_delay: Duration,
}

/// Validate and submit with the simulated intake delay. See [`submit_with`].
pub async fn submit(
    form: &mut Registration,
    sink: &mut impl NotificationSink,
) -> Option<SubmitOutcome> {
    submit_with(form, sink, |_payload| async {
        tokio::time::sleep(INTAKE_DELAY).await;
        Ok::<(), std::convert::Infallible>(())
    })
    .await
}

/// Validate and submit, with the payment-intake side effect injected. Emits
/// exactly one notification per call: the first validation failure, the
/// intake failure, or the success message. Returns the redirect outcome only
/// on success. `is_submitting` is cleared on every exit path past validation.
pub async fn submit_with<F, Fut, E>(
    form: &mut Registration,
    sink: &mut impl NotificationSink,
    intake: F,
) -> Option<SubmitOutcome>
where
    F: FnOnce(RegistrationPayload) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    if let Err(err) = validate_registration(form) {
        sink.notify(Notification::from(&err));
        return None;
    }

    form.is_submitting = true;
    // The payload is fixed here; edits racing the intake call land in the
    // form, not in this submission.
    let payload = RegistrationPayload::capture(form);

    let result = intake(payload.clone()).await;
    form.is_submitting = false;

    match result {
        Ok(()) => {
            sink.notify(Notification::normal(
                "Registration Successful!",
                format!(
                    "Redirecting to payment for ${:.2} per player...",
                    payload.cost_per_player
                ),
            ));
            let payment_url = payment_url(&payload);
            Some(SubmitOutcome {
                payload,
                payment_url,
                redirect_delay: REDIRECT_DELAY,
            })
        }
        Err(err) => {
            log::error!("Registration intake failed: {err}");
            sink.notify(Notification::destructive(
                "Registration Failed",
                "There was an error processing your registration. Please try again.",
            ));
            None
        }
    }
}
