//! Receipts module.

mod config;
mod errors;
mod formatting;
mod order;
mod request;
mod service;
mod templates;

pub use config::ReceiptConfig;
pub use errors::{ReceiptRequestError, SendReceiptError};
pub use formatting::{
    format_currency, format_date, format_date_time, pending_amount, short_reference,
};
pub use order::{Amount, Order, PaymentStatus};
pub use request::{ReceiptContent, ReceiptRequest, Recipients};
pub use service::{ReceiptService, ReceiptServiceImpl};
pub use templates::ReceiptTemplate;
