//! SMTP delivery of password-reset links.
//!
//! [`EmailNotifier`] only reacts to reset requests. Messages are queued on a
//! channel and sent by a background worker so `notify` never waits on the
//! relay.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::{ConfigError, Result};
use crate::infrastructure::config::smtp::SmtpConfig;
use crate::port::{Event, Notifier, ResetRequestedEvent};

const RESET_SUBJECT: &str = "Password Reset Request";

/// Failure to turn an event into a mail.
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
}

/// Sends reset links through an SMTP relay.
pub struct EmailNotifier {
    from: Mailbox,
    sender: mpsc::UnboundedSender<Message>,
}

impl EmailNotifier {
    /// Build the relay transport and spawn the delivery worker.
    ///
    /// Must be called from inside a Tokio runtime. No connection is made
    /// until the first mail is sent.
    ///
    /// # Errors
    /// Returns an error when the host or sender address is unusable.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from = sender_mailbox(config)?;
        let transport = build_transport(config)?;
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(email_worker(transport, receiver));
        Ok(Self { from, sender })
    }
}

impl Notifier for EmailNotifier {
    fn notify(&self, event: Event) {
        let Event::PasswordResetRequested(reset) = event else {
            return;
        };
        match reset_message(&self.from, &reset) {
            Ok(message) => {
                if self.sender.send(message).is_err() {
                    warn!("email notifier channel closed");
                }
            }
            Err(e) => warn!(error = %e, "cannot build reset email"),
        }
    }
}

fn sender_mailbox(config: &SmtpConfig) -> Result<Mailbox> {
    let sender = config
        .sender()
        .ok_or(ConfigError::MissingField { field: "SMTP_FROM" })?;
    sender.parse::<Mailbox>().map_err(|e| {
        ConfigError::InvalidValue {
            field: "from",
            reason: e.to_string(),
        }
        .into()
    })
}

fn build_transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let host = config
        .host
        .as_deref()
        .map(str::trim)
        .ok_or(ConfigError::MissingField { field: "SMTP_HOST" })?;
    let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        .map_err(|e| ConfigError::InvalidValue {
            field: "host",
            reason: e.to_string(),
        })?
        .port(config.port);
    if let Some((user, password)) = config.credentials() {
        builder = builder.credentials(Credentials::new(user.to_string(), password.to_string()));
    }
    Ok(builder.build())
}

/// Plain-text mail carrying the reset link.
///
/// # Errors
/// Returns an error when the recipient address is invalid.
pub fn reset_message(
    from: &Mailbox,
    event: &ResetRequestedEvent,
) -> std::result::Result<Message, EmailError> {
    let address: Address = event.email.parse()?;
    let name = Some(event.name.clone()).filter(|name| !name.is_empty());
    let message = Message::builder()
        .from(from.clone())
        .to(Mailbox::new(name, address))
        .subject(RESET_SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(reset_body(event))?;
    Ok(message)
}

fn reset_body(event: &ResetRequestedEvent) -> String {
    format!(
        "Hello {name},\n\n\
         You asked to reset your password. Open the link below to choose a new one:\n\n\
         {link}\n\n\
         The link expires at {expires} UTC.\n\n\
         If you did not ask for this, you can ignore this email.\n\n\
         Seafood AI Team\n",
        name = event.name,
        link = event.reset_link,
        expires = event.expires_at.format("%Y-%m-%d %H:%M"),
    )
}

async fn email_worker(
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mut receiver: mpsc::UnboundedReceiver<Message>,
) {
    info!("email notifier started");
    while let Some(message) = receiver.recv().await {
        if let Err(e) = transport.send(message).await {
            error!(error = %e, "failed to send email");
        }
    }
    warn!("email notifier worker shutting down");
}
