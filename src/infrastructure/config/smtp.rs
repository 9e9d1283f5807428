//! Outgoing mail settings for password-reset links.

use serde::Deserialize;

/// SMTP relay settings. Mail delivery is off while no host is configured.
/// Credentials are never read from the file; they come from `SMTP_USER`
/// and `SMTP_PASS`.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Relay host. `SMTP_HOST` overrides it.
    #[serde(default)]
    pub host: Option<String>,
    /// Submission port, upgraded with STARTTLS. `SMTP_PORT` overrides it.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sender mailbox. Falls back to the SMTP user.
    #[serde(default)]
    pub from: Option<String>,
    /// Loaded from the environment.
    #[serde(skip)]
    pub username: Option<String>,
    /// Loaded from the environment.
    #[serde(skip)]
    pub password: Option<String>,
}

fn default_port() -> u16 {
    587
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
            from: None,
            username: None,
            password: None,
        }
    }
}

impl SmtpConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.host.as_deref().is_some_and(|host| !host.trim().is_empty())
    }

    /// Address reset mails are sent from.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.from
            .as_deref()
            .or(self.username.as_deref())
            .filter(|sender| !sender.trim().is_empty())
    }

    /// User and password, when both are set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.username.as_deref()?, self.password.as_deref()?))
    }
}
