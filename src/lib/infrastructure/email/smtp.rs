//! SMTP email service implementation

use async_trait::async_trait;
use clap::{ArgAction, Parser};
use lettre::{
    message::{header::ContentType, Mailbox, Mailboxes, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError, Message};

use super::configured;

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST")]
    pub host: Option<String>,

    /// The SMTP port
    #[clap(id = "smtp_port", long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// Connect over implicit TLS instead of upgrading with STARTTLS
    #[clap(long = "smtp-secure", env = "SMTP_SECURE", default_value_t = false, action = ArgAction::Set)]
    pub secure: bool,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// The sender email address
    #[clap(long = "smtp-from", env = "SMTP_FROM")]
    pub sender: Option<String>,

    /// Verify the TLS certificate
    #[clap(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value_t = true, action = ArgAction::Set)]
    pub verify_tls: bool,
}

impl SMTPConfig {
    /// Names of the unset environment variables
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("SMTP_HOST", &self.host),
            ("SMTP_USER", &self.username),
            ("SMTP_PASSWORD", &self.password),
            ("SMTP_FROM", &self.sender),
        ]
        .into_iter()
        .filter(|(_, value)| configured(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for SMTPConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            secure: false,
            username: None,
            password: None,
            sender: None,
            verify_tls: true,
        }
    }
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Builds a transport for a single send
    pub fn mailer(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        let host = configured(&self.config.host)
            .ok_or_else(|| MailerError::NotConfigured("SMTP_HOST is not set".to_string()))?;

        let tls_parameters = TlsParameters::builder(host.to_string())
            .dangerous_accept_invalid_certs(!self.config.verify_tls)
            .build()?;

        let tls = if self.config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(self.config.port)
            .tls(tls);

        if let (Some(username), Some(password)) = (
            configured(&self.config.username),
            configured(&self.config.password),
        ) {
            builder = builder.credentials(Credentials::new(
                username.to_string(),
                password.to_string(),
            ));
        }

        Ok(builder.build())
    }

    /// Builds the MIME message for `message`
    pub fn email(&self, message: &Message) -> Result<Email, MailerError> {
        let sender: Mailbox = configured(&self.config.sender)
            .ok_or_else(|| MailerError::NotConfigured("SMTP_FROM is not set".to_string()))?
            .parse()?;

        let recipients: Mailboxes = message.to.parse()?;

        let mut builder = Email::builder()
            .from(sender.clone())
            .subject(message.subject.clone());

        for recipient in recipients {
            builder = builder.to(recipient);
        }

        if message.send_copy {
            builder = builder.bcc(sender);
        }

        let email = match &message.plain_body {
            Some(plain) => builder.multipart(MultiPart::alternative_plain_html(
                plain.clone(),
                message.html_body.clone(),
            ))?,
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(message.html_body.clone())?,
        };

        Ok(email)
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        let email = self.email(message)?;

        debug!(to = %message.to, "submitting email over SMTP");

        self.mailer()?.send(email).await?;

        Ok(())
    }
}
