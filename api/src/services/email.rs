//! Email service for the `/send-email` page.
//!
//! Sends a single plain-text message through an SMTP relay (Gmail on port 587
//! with STARTTLS by default) using the `lettre` crate.
//!
//! # Environment Variables
//! - `SENDER_EMAIL`: account used both as `From` and as the SMTP login
//! - `PASSWORD`: SMTP password (for Gmail, an app password)
//! - `SUBJECT`: subject line, `QUICK MAIL` when unset
//! - `SMTP_HOST` / `SMTP_PORT`: relay address

use lettre::{
    AsyncTransport, Message, Tokio1Executor,
    address::AddressError,
    message::{Mailbox, header::ContentType},
    transport::smtp::{AsyncSmtpTransport, authentication::Credentials},
    transport::stub::AsyncStubTransport,
};
use util::config::AppConfig;

pub const SUCCESS_MESSAGE: &str = "🎉 Email Sent Successfully";

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub sender: String,
    pub password: String,
    pub subject: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl From<&AppConfig> for MailSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            sender: cfg.sender_email.clone(),
            password: cfg.password.clone(),
            subject: cfg.subject.clone(),
            smtp_host: cfg.smtp_host.clone(),
            smtp_port: cfg.smtp_port,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("sender email or password is not configured")]
    NotConfigured,

    #[error("invalid {field} address '{value}': {source}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        #[source]
        source: AddressError,
    },

    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("{0}")]
    Transport(String),
}

enum MailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    Stub(AsyncStubTransport),
}

/// Sends plain-text mail on behalf of the configured sender.
pub struct EmailService {
    settings: MailSettings,
    transport: Option<MailTransport>,
}

impl EmailService {
    /// Builds an SMTP-backed service. Nothing connects until the first send.
    ///
    /// Missing credentials are not an error here; every send will report
    /// [`EmailError::NotConfigured`] instead.
    pub fn smtp(settings: MailSettings) -> Self {
        if settings.sender.is_empty() || settings.password.is_empty() {
            tracing::warn!("SENDER_EMAIL or PASSWORD not set; email sending is disabled");
            return Self {
                settings,
                transport: None,
            };
        }

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(
            &settings.smtp_host,
        ) {
            Ok(builder) => Some(MailTransport::Smtp(
                builder
                    .port(settings.smtp_port)
                    .credentials(Credentials::new(
                        settings.sender.clone(),
                        settings.password.clone(),
                    ))
                    .build(),
            )),
            Err(e) => {
                tracing::error!(host = %settings.smtp_host, error = %e, "Failed to set up SMTP relay");
                None
            }
        };

        Self {
            settings,
            transport,
        }
    }

    /// A service that records messages in memory instead of sending them.
    pub fn stub(settings: MailSettings, stub: AsyncStubTransport) -> Self {
        Self {
            settings,
            transport: Some(MailTransport::Stub(stub)),
        }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    /// `From` = sender, `To` = receiver, the configured subject and a
    /// `text/plain` body.
    pub fn build_message(&self, receiver: &str, body: &str) -> Result<Message, EmailError> {
        let from = parse_mailbox("sender", &self.settings.sender)?;
        let to = parse_mailbox("receiver", receiver)?;

        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject(self.settings.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?)
    }

    pub async fn send(&self, receiver: &str, body: &str) -> Result<(), EmailError> {
        let transport = match (&self.transport, self.settings.sender.is_empty()) {
            (Some(t), false) => t,
            _ => return Err(EmailError::NotConfigured),
        };

        let message = self.build_message(receiver, body)?;

        match transport {
            MailTransport::Smtp(smtp) => smtp
                .send(message)
                .await
                .map(|_| ())
                .map_err(|e| EmailError::Transport(e.to_string())),
            MailTransport::Stub(stub) => stub
                .send(message)
                .await
                .map(|_| ())
                .map_err(|e| EmailError::Transport(e.to_string())),
        }
    }

    /// Sends and returns the text shown to the user on the email page.
    pub async fn send_report(&self, receiver: &str, body: &str) -> String {
        match self.send(receiver, body).await {
            Ok(()) => {
                tracing::info!(to = %receiver, "Email sent");
                SUCCESS_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::warn!(to = %receiver, error = %e, "Email failed");
                format!("Error Occurred: {e}")
            }
        }
    }
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, EmailError> {
    value
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| EmailError::InvalidAddress {
            field,
            value: value.to_string(),
            source,
        })
}
