use tracing::info;

use crate::port::{Event, Notifier};

/// Writes every event to the log.
///
/// Without an SMTP relay this is how reset links reach an operator.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::UserRegistered(e) => {
                info!(user_id = e.user_id, email = %e.email, "User registered");
            }
            Event::PasswordResetRequested(e) => {
                info!(
                    email = %e.email,
                    name = %e.name,
                    reset_link = %e.reset_link,
                    expires_at = %e.expires_at,
                    "Password reset requested"
                );
            }
            Event::PasswordReset(e) => {
                info!(user_id = e.user_id, email = %e.email, "Password reset completed");
            }
            Event::ImportCompleted(e) => {
                info!(
                    kind = e.kind,
                    source = %e.source,
                    inserted = e.report.inserted,
                    skipped = e.report.skipped,
                    "Import completed"
                );
            }
        }
    }
}
