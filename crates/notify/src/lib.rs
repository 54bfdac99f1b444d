//! Delivery of contact-form submissions as push notifications.
//!
//! The site never stores a submitted message anywhere; it relays it to
//! an external notification topic and forgets it. This crate defines
//! the sink contract and ships an implementation for ntfy.sh.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod ntfy;

use std::error::Error;

pub use ntfy::{NtfyConfig, NtfyConfigBuilder, NtfySink};

/// A push notification to deliver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Notification {
    /// The notification title.
    pub title: String,
    /// A comma-separated tag list.
    pub tags: String,
    /// The free-text body.
    pub body: String,
}

impl Notification {
    /// Creates the notification for a contact-form lead.
    pub fn contact_lead(name: &str, email: &str, message: &str) -> Self {
        Self {
            title: "Nuevo Lead desde Web".to_owned(),
            tags: "rocket".to_owned(),
            body: format!("De: {name} ({email})\n\n{message}"),
        }
    }
}

/// A type that can deliver a [`Notification`] somewhere.
///
/// Delivery is fire-and-forget: nothing is consumed from the sink's
/// answer beyond the success/failure status, and no retry is attempted
/// on failure.
pub trait NotificationSink: Send + Sync {
    /// The error type that may be returned by the sink.
    type Error: Error + Send + Sync + 'static;

    /// Delivers a notification.
    fn push(
        &self,
        note: &Notification,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_lead_body() {
        let note = Notification::contact_lead(
            "Ana",
            "ana@example.com",
            "Hola, tengo un proyecto IoT.",
        );
        assert_eq!(note.title, "Nuevo Lead desde Web");
        assert_eq!(note.tags, "rocket");
        assert_eq!(
            note.body,
            "De: Ana (ana@example.com)\n\nHola, tengo un proyecto IoT."
        );
    }
}
