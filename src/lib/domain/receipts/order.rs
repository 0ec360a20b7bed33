//! Order supplied by the caller

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// A monetary amount.
///
/// Accepts JSON numbers and numeric strings (`"1234.50"` or `"1234,50"`).
/// Anything else, including `null` and non-finite values, counts as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAmount")]
pub struct Amount(f64);

impl Amount {
    /// Create a new amount, replacing non-finite values with zero
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// The amount as a float
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl From<RawAmount> for Amount {
    fn from(raw: RawAmount) -> Self {
        match raw {
            RawAmount::Number(value) => Amount::new(value),
            RawAmount::Text(text) => {
                let text = text.trim();

                text.parse::<f64>()
                    .or_else(|_| text.replace(',', ".").parse::<f64>())
                    .map(Amount::new)
                    .unwrap_or_default()
            }
            RawAmount::Other(_) => Amount::default(),
        }
    }
}

/// A free text value that storefronts sometimes send as a number
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

impl RawText {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(number) => Some(number.to_string()),
            Self::Other(_) => None,
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawText>::deserialize(deserializer)?.and_then(RawText::into_text))
}

/// Payment status of an order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Nothing paid yet
    Unpaid,

    /// Down payment received
    Partial,

    /// Fully paid
    Paid,

    /// Missing or unrecognised status
    #[default]
    #[serde(other)]
    Unspecified,
}

impl PaymentStatus {
    /// Label shown on the receipt
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unpaid => "Não pago",
            Self::Partial => "Pagamento parcial",
            Self::Paid => "Pago",
            Self::Unspecified => "Não informado",
        }
    }
}

/// An order, as sent by the storefront
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// Order identifier
    #[serde(deserialize_with = "text")]
    pub id: String,

    /// Client name
    pub client_name: String,

    /// Client phone number
    #[serde(deserialize_with = "text")]
    pub phone: String,

    /// Free text description of the piece
    pub description: String,

    /// Ring size, when the piece is a ring
    #[serde(deserialize_with = "optional_text")]
    pub ring_size: Option<String>,

    /// Text to engrave
    #[serde(deserialize_with = "optional_text")]
    pub engraving: Option<String>,

    /// Total value
    pub value: Amount,

    /// Amount paid up front
    pub down_payment: Option<Amount>,

    /// Promised delivery date
    pub delivery_date: String,

    /// Payment status
    pub payment_status: PaymentStatus,

    /// Payment method
    pub payment_method: String,

    /// Free text observations
    pub observations: String,

    /// When the order was registered
    pub created_at: Option<String>,

    /// Who registered the order
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_order_from_storefront_json() -> TestResult {
        let order: Order = serde_json::from_value(json!({
            "id": "665f1c2ab1e4d9a1c3f0a9b7",
            "clientName": "Maria Souza",
            "phone": "(11) 98888-7777",
            "description": "Aliança em ouro 18k",
            "ringSize": "16",
            "value": 1234.5,
            "downPayment": "400",
            "deliveryDate": "2026-10-05",
            "paymentStatus": "partial",
            "paymentMethod": "pix",
            "createdAt": "2026-09-20T13:45:00Z",
            "createdBy": "Ana"
        }))?;

        assert_eq!(order.client_name, "Maria Souza");
        assert_eq!(order.ring_size.as_deref(), Some("16"));
        assert_eq!(order.engraving, None);
        assert_eq!(order.value.value(), 1234.5);
        assert_eq!(order.down_payment, Some(Amount::new(400.0)));
        assert_eq!(order.payment_status, PaymentStatus::Partial);

        Ok(())
    }

    #[test]
    fn test_numeric_text_fields_are_accepted() -> TestResult {
        let order: Order = serde_json::from_value(json!({
            "id": 12345678,
            "phone": 11988887777u64,
            "ringSize": 16,
            "engraving": null
        }))?;

        assert_eq!(order.id, "12345678");
        assert_eq!(order.phone, "11988887777");
        assert_eq!(order.ring_size.as_deref(), Some("16"));
        assert_eq!(order.engraving, None);

        Ok(())
    }

    #[test]
    fn test_non_numeric_amounts_count_as_zero() -> TestResult {
        let order: Order = serde_json::from_value(json!({
            "value": "not a number",
            "downPayment": { "amount": 10 }
        }))?;

        assert_eq!(order.value.value(), 0.0);
        assert_eq!(order.down_payment, Some(Amount::default()));

        Ok(())
    }

    #[test]
    fn test_comma_decimal_amount() -> TestResult {
        let amount: Amount = serde_json::from_value(json!("1234,50"))?;

        assert_eq!(amount.value(), 1234.5);

        Ok(())
    }

    #[test]
    fn test_unknown_payment_status() -> TestResult {
        let order: Order = serde_json::from_value(json!({ "paymentStatus": "refunded" }))?;

        assert_eq!(order.payment_status, PaymentStatus::Unspecified);

        Ok(())
    }

    #[test]
    fn test_empty_order() -> TestResult {
        let order: Order = serde_json::from_value(json!({}))?;

        assert_eq!(order, Order::default());

        Ok(())
    }
}
