//! EmailJS email service implementation

use async_trait::async_trait;
use clap::Parser;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::communication::mailer::{Mailer, MailerError, Message};

use super::configured;

/// The EmailJS send endpoint
pub const EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// EmailJS configuration
#[derive(Clone, Debug, Parser)]
pub struct EmailJsConfig {
    /// The EmailJS service ID
    #[clap(long = "emailjs-service-id", env = "EMAILJS_SERVICE_ID")]
    pub service_id: Option<String>,

    /// The EmailJS template ID
    #[clap(long = "emailjs-template-id", env = "EMAILJS_TEMPLATE_ID")]
    pub template_id: Option<String>,

    /// The EmailJS public key
    #[clap(long = "emailjs-public-key", env = "EMAILJS_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// The EmailJS private key (access token)
    #[clap(long = "emailjs-private-key", env = "EMAILJS_PRIVATE_KEY")]
    pub private_key: Option<String>,

    /// The EmailJS send endpoint
    #[clap(long = "emailjs-api-url", env = "EMAILJS_API_URL", default_value = EMAILJS_API_URL)]
    pub api_url: String,
}

impl EmailJsConfig {
    /// Names of the unset environment variables
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("EMAILJS_SERVICE_ID", &self.service_id),
            ("EMAILJS_TEMPLATE_ID", &self.template_id),
            ("EMAILJS_PUBLIC_KEY", &self.public_key),
            ("EMAILJS_PRIVATE_KEY", &self.private_key),
        ]
        .into_iter()
        .filter(|(_, value)| configured(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            service_id: None,
            template_id: None,
            public_key: None,
            private_key: None,
            api_url: EMAILJS_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    subject: &'a str,
    extra_message: &'a str,
    receipt_html: &'a str,
    send_copy: &'static str,
}

/// EmailJS mailer
#[derive(Debug, Default, Clone)]
pub struct EmailJsMailer {
    client: Client,
    config: EmailJsConfig,
}

impl EmailJsMailer {
    /// Create a new EmailJS mailer
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn payload<'a>(&'a self, message: &'a Message) -> Result<Payload<'a>, MailerError> {
        let (Some(service_id), Some(template_id), Some(public_key)) = (
            configured(&self.config.service_id),
            configured(&self.config.template_id),
            configured(&self.config.public_key),
        ) else {
            return Err(MailerError::NotConfigured(
                "EmailJS service, template and public key are required".to_string(),
            ));
        };

        Ok(Payload {
            service_id,
            template_id,
            user_id: public_key,
            access_token: configured(&self.config.private_key),
            template_params: TemplateParams {
                to_email: &message.to,
                subject: &message.subject,
                extra_message: message.extra_message.as_deref().unwrap_or_default(),
                receipt_html: &message.html_body,
                send_copy: if message.send_copy { "sim" } else { "nao" },
            },
        })
    }
}

#[async_trait]
impl Mailer for EmailJsMailer {
    async fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        let payload = self.payload(message)?;

        debug!(to = %message.to, "sending email through EmailJS");

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            error!(%status, body, "EmailJS rejected the email");

            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
