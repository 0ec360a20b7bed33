//! Validated receipt request

use std::fmt;

use super::order::Order;

/// Recipients of a receipt, blank entries removed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Create a recipient list, trimming entries and dropping blank ones
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            raw.into_iter()
                .map(|email| email.as_ref().trim().to_string())
                .filter(|email| !email.is_empty())
                .collect(),
        )
    }

    /// Returns `true` when no recipient is left
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recipients joined with `", "`, as handed to the mail transport
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl fmt::Display for Recipients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

/// What the email body is built from
#[derive(Clone, Debug, PartialEq)]
pub enum ReceiptContent {
    /// An order, rendered server-side
    Order(Box<Order>),

    /// HTML rendered by the caller, sent verbatim
    Html(String),
}

/// A receipt ready to be sent
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiptRequest {
    /// Who receives the receipt
    pub recipients: Recipients,

    /// Email subject
    pub subject: String,

    /// Optional message shown above the receipt
    pub extra_message: Option<String>,

    /// Whether the sender wants a copy
    pub send_copy: bool,

    /// Email body source
    pub content: ReceiptContent,
}

impl ReceiptRequest {
    /// Creates a new receipt request without extra message or copy
    pub fn new(recipients: Recipients, subject: &str, content: ReceiptContent) -> Self {
        Self {
            recipients,
            subject: subject.to_string(),
            extra_message: None,
            send_copy: false,
            content,
        }
    }
}
