//! Notifier port for account and import events.
//!
//! This module defines the trait for sending notifications about
//! system events such as password-reset requests and finished imports.

use chrono::NaiveDateTime;

use crate::domain::ImportReport;

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A new account was created.
    UserRegistered(AccountEvent),
    /// A reset link must be delivered to the user.
    PasswordResetRequested(ResetRequestedEvent),
    /// A reset token was redeemed.
    PasswordReset(AccountEvent),
    /// A spreadsheet import batch finished.
    ImportCompleted(ImportEvent),
}

/// Account lifecycle event.
#[derive(Debug, Clone)]
pub struct AccountEvent {
    pub user_id: i32,
    pub email: String,
}

/// Password reset request.
#[derive(Debug, Clone)]
pub struct ResetRequestedEvent {
    pub email: String,
    pub name: String,
    /// `{frontend_url}/reset-password?token=...`
    pub reset_link: String,
    pub expires_at: NaiveDateTime,
}

/// Import batch summary.
#[derive(Debug, Clone)]
pub struct ImportEvent {
    /// `prices` or `landings`.
    pub kind: &'static str,
    pub source: String,
    pub report: ImportReport,
}

/// Trait for notification handlers.
///
/// Implementations must be thread-safe and return quickly; slow delivery
/// (mail, HTTP) belongs on a spawned task.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}
