//! Notification side-channel. The form reports outcomes through an injected
//! sink so the logic stays independent of any rendering layer.

use crate::models::RegistrationError;
use serde::{Deserialize, Serialize};

/// How the message should be presented.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Destructive,
}

/// One discrete message for the user. Presentation is the caller's job.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

impl From<&RegistrationError> for Notification {
    fn from(err: &RegistrationError) -> Self {
        Notification::destructive(err.title(), err.to_string())
    }
}

/// Where notifications go. Any `FnMut(Notification)` works, so tests can
/// collect into a `Vec` through a closure.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl<F: FnMut(Notification)> NotificationSink for F {
    fn notify(&mut self, notification: Notification) {
        self(notification)
    }
}
