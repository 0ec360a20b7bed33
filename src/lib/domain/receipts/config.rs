//! Receipt rendering configuration

use chrono::{FixedOffset, Offset, Utc};
use clap::Parser;

/// Receipt rendering configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct ReceiptConfig {
    /// Logo shown at the top of the receipt
    #[arg(long, env = "RECEIPT_LOGO_URL")]
    pub logo_url: Option<String>,

    /// Store name shown on the receipt
    #[arg(long, env = "RECEIPT_STORE_NAME", default_value = "JAMP")]
    pub store_name: String,

    /// Offset from UTC, in hours, used to display dates
    #[arg(
        long,
        env = "RECEIPT_UTC_OFFSET_HOURS",
        default_value = "-3",
        allow_hyphen_values = true
    )]
    pub utc_offset_hours: i32,
}

impl ReceiptConfig {
    /// The display offset, UTC when the configured value is out of range
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// The logo URL, if one is set and non-blank
    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            logo_url: None,
            store_name: "JAMP".to_string(),
            utc_offset_hours: -3,
        }
    }
}
