//! Mailer module

use async_trait::async_trait;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::Message;

/// Mail transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver. Its recipient list is a single
    ///   comma separated string.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send_email(&self, message: &Message) -> Result<(), MailerError>;
}
