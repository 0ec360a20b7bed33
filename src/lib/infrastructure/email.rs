//! Mail transports

use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use crate::domain::communication::mailer::{Mailer, MailerError, Message};

use emailjs::{EmailJsConfig, EmailJsMailer};
use smtp::{SMTPConfig, SMTPMailer};

pub mod emailjs;
pub mod smtp;

/// Which transport delivers the email
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MailTransportKind {
    /// Direct SMTP submission
    #[default]
    Smtp,

    /// EmailJS REST API
    #[value(name = "emailjs")]
    EmailJs,
}

/// Mail transport configuration
#[derive(Clone, Debug, Parser)]
pub struct MailerConfig {
    /// The transport used to deliver email
    #[arg(long = "mail-transport", env = "MAIL_TRANSPORT", value_enum, default_value_t = MailTransportKind::Smtp)]
    pub transport: MailTransportKind,

    /// SMTP configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// EmailJS configuration
    #[clap(flatten)]
    pub emailjs: EmailJsConfig,
}

impl MailerConfig {
    /// Logs a warning for every unset value the selected transport relies on
    pub fn warn_missing(&self) {
        let missing = match self.transport {
            MailTransportKind::Smtp => self.smtp.missing(),
            MailTransportKind::EmailJs => self.emailjs.missing(),
        };

        for name in missing {
            warn!("environment variable {name} is not set");
        }
    }
}

/// The mail transport, selected once at startup
#[derive(Clone, Debug)]
pub enum MailTransport {
    /// Direct SMTP submission
    Smtp(SMTPMailer),

    /// EmailJS REST API
    EmailJs(EmailJsMailer),
}

impl MailTransport {
    /// Builds the transport selected in `config`
    pub fn new(config: MailerConfig) -> Self {
        info!(transport = ?config.transport, "using mail transport");

        match config.transport {
            MailTransportKind::Smtp => Self::Smtp(SMTPMailer::new(config.smtp)),
            MailTransportKind::EmailJs => Self::EmailJs(EmailJsMailer::new(config.emailjs)),
        }
    }
}

#[async_trait]
impl Mailer for MailTransport {
    async fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        match self {
            Self::Smtp(mailer) => mailer.send_email(message).await,
            Self::EmailJs(mailer) => mailer.send_email(message).await,
        }
    }
}

/// Returns the configured value when it is set and non-blank
pub(crate) fn configured(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
