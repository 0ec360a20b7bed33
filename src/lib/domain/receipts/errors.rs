use thiserror::Error;
use tracing::debug;

use crate::domain::communication::mailer::MailerError;

/// Errors raised while validating a receipt request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptRequestError {
    /// One or more required fields are absent or blank
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Errors that can occur when sending a receipt
#[derive(Debug, Error)]
pub enum SendReceiptError {
    /// The mail transport lacks required configuration
    #[error("mail transport is not configured: {0}")]
    NotConfigured(String),

    /// The receipt could not be rendered
    #[error("could not render receipt")]
    RenderError(#[from] askama::Error),

    /// The mail transport failed to deliver the email
    #[error("could not send receipt email")]
    CouldNotSendEmail(#[source] MailerError),
}

impl From<MailerError> for SendReceiptError {
    fn from(err: MailerError) -> Self {
        debug!("MailerError -> SendReceiptError");

        match err {
            MailerError::NotConfigured(detail) => SendReceiptError::NotConfigured(detail),
            err => SendReceiptError::CouldNotSendEmail(err),
        }
    }
}
