// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail transports.

use std::time::Duration;

use async_trait::async_trait;
use frontdesk_config::model::EmailConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::{MailerAdapter, PluginAdapter};
use frontdesk_core::types::{AdapterType, HealthStatus, OutboundEmail};
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

/// Content type of the calendar alternative, so clients offer accept/decline.
const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8; method=REQUEST";

fn mail_error<E>(message: impl Into<String>, err: E) -> FrontdeskError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FrontdeskError::Mail {
        message: message.into(),
        source: Some(Box::new(err)),
    }
}

/// SMTP delivery through lettre's Tokio transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
    company_email: String,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, FrontdeskError> {
        let builder = if config.implicit_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| mail_error(format!("invalid SMTP relay {}", config.smtp_host), e))?;

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.send_timeout_secs)));

        match (&config.username, &config.password) {
            (Some(user), Some(pass)) => {
                builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
            }
            _ => warn!("SMTP credentials are incomplete; connecting without authentication"),
        }

        let sender = sender_address(config)?;

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            implicit_tls = config.implicit_tls,
            "SMTP mailer initialized"
        );

        Ok(Self {
            transport: builder.build(),
            sender,
            company_email: config.company_email.clone(),
        })
    }

    /// Assembles the MIME message without sending it.
    pub fn build_message(&self, email: &OutboundEmail) -> Result<Message, FrontdeskError> {
        let from = Mailbox::new(Some(email.from_name.clone()), self.sender.clone());
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| mail_error(format!("invalid recipient {}", email.to), e))?;

        let builder = Message::builder().from(from).to(to).subject(&email.subject);

        let message = match &email.calendar {
            Some(ics) => {
                let calendar_type = ContentType::parse(CALENDAR_CONTENT_TYPE)
                    .map_err(|e| mail_error("invalid calendar content type", e))?;
                builder.multipart(
                    MultiPart::alternative()
                        .singlepart(SinglePart::html(email.html.clone()))
                        .singlepart(
                            SinglePart::builder()
                                .header(calendar_type)
                                .body(ics.clone()),
                        ),
                )
            }
            None => builder.singlepart(SinglePart::html(email.html.clone())),
        };

        message.map_err(|e| mail_error("failed to build message", e))
    }
}

/// The From address: the SMTP login when it is an address, else the company inbox.
fn sender_address(config: &EmailConfig) -> Result<Address, FrontdeskError> {
    let raw = config
        .username
        .as_deref()
        .filter(|u| u.contains('@'))
        .unwrap_or(&config.company_email);
    raw.parse()
        .map_err(|e| FrontdeskError::Config(format!("invalid sender address {raw}: {e}")))
}

#[async_trait]
impl PluginAdapter for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Mailer
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Degraded("SMTP server did not answer".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        debug!("SMTP mailer shutting down");
        Ok(())
    }
}

#[async_trait]
impl MailerAdapter for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), FrontdeskError> {
        let message = self.build_message(&email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| mail_error(format!("failed to deliver \"{}\"", email.subject), e))?;
        debug!(code = %response.code(), to = %email.to, "SMTP accepted message");
        Ok(())
    }

    fn company_address(&self) -> &str {
        &self.company_email
    }
}

/// Logs messages instead of delivering them.
pub struct LogMailer {
    company_email: String,
}

impl LogMailer {
    pub fn new(company_email: &str) -> Self {
        Self {
            company_email: company_email.to_string(),
        }
    }
}

#[async_trait]
impl PluginAdapter for LogMailer {
    fn name(&self) -> &str {
        "log"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Mailer
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        Ok(HealthStatus::Degraded("mail delivery disabled".into()))
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl MailerAdapter for LogMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), FrontdeskError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            has_invite = email.calendar.is_some(),
            "mail delivery disabled; message dropped"
        );
        Ok(())
    }

    fn company_address(&self) -> &str {
        &self.company_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            smtp_host: "localhost".into(),
            username: Some("bookings@example.com".into()),
            password: Some("secret".into()),
            ..EmailConfig::default()
        }
    }

    fn outbound(calendar: Option<&str>) -> OutboundEmail {
        OutboundEmail {
            from_name: "Lagentry".into(),
            to: "visitor@example.com".into(),
            subject: "Your Lagentry Demo is Confirmed".into(),
            html: "<p>See you soon</p>".into(),
            calendar: calendar.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn sender_prefers_smtp_login() {
        let mailer = SmtpMailer::new(&enabled_config()).unwrap();
        let bytes = mailer.build_message(&outbound(None)).unwrap().formatted();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("bookings@example.com"));
        assert!(text.contains("visitor@example.com"));
        assert!(text.contains("text/html"));
        assert!(!text.contains("text/calendar"));
    }

    #[tokio::test]
    async fn sender_falls_back_to_company_inbox() {
        let config = EmailConfig {
            username: Some("smtp-user".into()),
            ..enabled_config()
        };
        let mailer = SmtpMailer::new(&config).unwrap();
        let bytes = mailer.build_message(&outbound(None)).unwrap().formatted();
        assert!(String::from_utf8_lossy(&bytes).contains("info@lagentry.com"));
    }

    #[tokio::test]
    async fn calendar_becomes_an_alternative_part() {
        let mailer = SmtpMailer::new(&enabled_config()).unwrap();
        let message = mailer
            .build_message(&outbound(Some("BEGIN:VCALENDAR\r\nEND:VCALENDAR")))
            .unwrap();
        let text = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(text.contains("multipart/alternative"));
        assert!(text.contains("text/calendar"));
        assert!(text.contains("method=REQUEST"));
    }

    #[tokio::test]
    async fn invalid_recipient_is_a_mail_error() {
        let mailer = SmtpMailer::new(&enabled_config()).unwrap();
        let mut email = outbound(None);
        email.to = "not an address".into();
        let err = mailer.build_message(&email).unwrap_err();
        assert!(matches!(err, FrontdeskError::Mail { .. }));
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer::new("ops@example.com");
        mailer.send(outbound(None)).await.unwrap();
        assert_eq!(mailer.company_address(), "ops@example.com");
    }
}
