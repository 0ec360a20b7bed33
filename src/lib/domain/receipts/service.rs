//! Receipt service

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::{Mailer, Message};

use super::{
    config::ReceiptConfig,
    errors::SendReceiptError,
    request::{ReceiptContent, ReceiptRequest},
    templates::ReceiptTemplate,
};

/// Receipt service
#[async_trait]
pub trait ReceiptService: Clone + Send + Sync + 'static {
    /// Sends a receipt email.
    ///
    /// # Arguments
    /// * `request` - The validated [`ReceiptRequest`].
    ///
    /// # Returns
    /// - [`Ok`] once the mail transport accepted the email.
    /// - [`Err`] containing a [`SendReceiptError`] otherwise. Nothing is
    ///   retried.
    async fn send_receipt(&self, request: ReceiptRequest) -> Result<(), SendReceiptError>;
}

#[cfg(test)]
mock! {
    pub ReceiptService {}

    impl Clone for ReceiptService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ReceiptService for ReceiptService {
        async fn send_receipt(&self, request: ReceiptRequest) -> Result<(), SendReceiptError>;
    }
}

/// Receipt service implementation
#[derive(Debug, Clone)]
pub struct ReceiptServiceImpl<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    config: ReceiptConfig,
}

impl<M> ReceiptServiceImpl<M>
where
    M: Mailer,
{
    /// Creates a new receipt service.
    pub fn new(mailer: Arc<M>, config: ReceiptConfig) -> Self {
        Self { mailer, config }
    }

    fn build_message(&self, request: ReceiptRequest) -> Result<Message, SendReceiptError> {
        let (html_body, plain_body) = match &request.content {
            ReceiptContent::Order(order) => {
                let template = ReceiptTemplate::new(
                    order,
                    request.extra_message.as_deref(),
                    &self.config,
                    Utc::now(),
                );

                (template.render()?, Some(template.render_plain()))
            }
            ReceiptContent::Html(html) => (html.clone(), None),
        };

        Ok(Message {
            to: request.recipients.joined(),
            subject: request.subject,
            html_body,
            plain_body,
            extra_message: request.extra_message,
            send_copy: request.send_copy,
        })
    }
}

#[async_trait]
impl<M> ReceiptService for ReceiptServiceImpl<M>
where
    M: Mailer,
{
    async fn send_receipt(&self, request: ReceiptRequest) -> Result<(), SendReceiptError> {
        let message = self.build_message(request)?;

        self.mailer.send_email(&message).await?;

        info!(to = %message.to, subject = %message.subject, "receipt sent");

        Ok(())
    }
}
