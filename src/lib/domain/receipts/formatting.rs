//! Display rules used on receipts

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use super::order::Amount;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const NAIVE_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Formats a value as `1.234,50`: two decimals, comma decimal separator and
/// dot thousands separator.
pub fn format_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rounded = format!("{:.2}", value.abs());
    let (integer, cents) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && rounded != "0.00" {
        "-"
    } else {
        ""
    };

    format!("{sign}{grouped},{cents}")
}

/// Outstanding balance: total minus down payment. Not clamped, so an
/// overpaid order yields a negative balance.
pub fn pending_amount(value: Amount, down_payment: Option<Amount>) -> f64 {
    value.value() - down_payment.map(|amount| amount.value()).unwrap_or(0.0)
}

/// Trailing six characters of an order id
pub fn short_reference(id: &str) -> String {
    let count = id.chars().count();

    id.chars().skip(count.saturating_sub(6)).collect()
}

/// Formats a date as `05 de outubro de 2026`.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to `offset`) and naive
/// date-times. Anything else is returned unchanged.
pub fn format_date(raw: &str, offset: FixedOffset) -> String {
    match parse_date(raw.trim(), offset) {
        Some(date) => format!(
            "{:02} de {} de {}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        None => raw.to_string(),
    }
}

/// Formats a timestamp as `20/09/2026 10:45` in `offset`.
///
/// Missing or unparseable input falls back to `now`.
pub fn format_date_time(raw: Option<&str>, offset: FixedOffset, now: DateTime<Utc>) -> String {
    let local = raw
        .and_then(|raw| parse_date_time(raw.trim(), offset))
        .unwrap_or_else(|| now.with_timezone(&offset).naive_local());

    local.format("%d/%m/%Y %H:%M").to_string()
}

fn parse_date(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_date_time(raw, offset).map(|date_time| date_time.date()))
}

fn parse_date_time(raw: &str, offset: FixedOffset) -> Option<NaiveDateTime> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.with_timezone(&offset).naive_local());
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
