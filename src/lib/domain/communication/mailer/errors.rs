//! Mailer errors

use lettre::{address::AddressError, error::Error};
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The transport is missing required configuration
    #[error("mail transport is not configured: {0}")]
    NotConfigured(String),

    /// Invalid email address
    #[error("Invalid email address")]
    InvalidEmail,

    /// The upstream mail service answered with a non-success status
    #[error("mail service rejected the email with status {status}: {body}")]
    Rejected {
        /// HTTP status returned upstream
        status: u16,

        /// Response body, empty when it could not be read
        body: String,
    },

    /// An error occurred while delivering the email
    #[error("An error occurred while sending the email: {0}")]
    SendError(anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(_err: AddressError) -> Self {
        MailerError::InvalidEmail
    }
}

impl From<Error> for MailerError {
    fn from(err: Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}

impl From<lettre::transport::smtp::Error> for MailerError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailerError::SendError(err.into())
    }
}

impl From<reqwest::Error> for MailerError {
    fn from(err: reqwest::Error) -> Self {
        MailerError::SendError(err.into())
    }
}
