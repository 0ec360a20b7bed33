//! Receipt email template

use askama::Template;
use chrono::{DateTime, Utc};

use super::{
    config::ReceiptConfig,
    formatting::{format_currency, format_date, format_date_time, pending_amount, short_reference},
    order::Order,
};

/// Receipt email template.
///
/// Every field is interpolated through askama's HTML escaper.
#[derive(Debug, Template)]
#[template(path = "emails/receipts/receipt.html")]
pub struct ReceiptTemplate {
    /// Store name shown in the header
    pub store_name: String,

    /// Logo shown in the header
    pub logo_url: Option<String>,

    /// Short order reference
    pub reference: String,

    /// Message shown in a banner above the receipt
    pub extra_message: Option<String>,

    /// Client name
    pub client_name: String,

    /// Client phone
    pub phone: String,

    /// Piece description
    pub description: String,

    /// Ring size
    pub ring_size: Option<String>,

    /// Engraving text
    pub engraving: Option<String>,

    /// Formatted total
    pub total: String,

    /// Formatted down payment
    pub down_payment: Option<String>,

    /// Formatted outstanding balance
    pub pending: String,

    /// Payment status label
    pub payment_status: String,

    /// Payment method
    pub payment_method: String,

    /// Formatted delivery date
    pub delivery_date: String,

    /// Observations
    pub observations: Option<String>,

    /// Formatted registration timestamp
    pub created_at: String,

    /// Who registered the order
    pub created_by: String,
}

impl ReceiptTemplate {
    /// Creates a new `ReceiptTemplate` for `order`.
    ///
    /// `now` stands in for a missing or invalid creation timestamp.
    pub fn new(
        order: &Order,
        extra_message: Option<&str>,
        config: &ReceiptConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let offset = config.utc_offset();

        Self {
            store_name: config.store_name.clone(),
            logo_url: config.logo_url().map(str::to_string),
            reference: short_reference(&order.id),
            extra_message: non_blank(extra_message),
            client_name: order.client_name.clone(),
            phone: order.phone.clone(),
            description: order.description.clone(),
            ring_size: non_blank(order.ring_size.as_deref()),
            engraving: non_blank(order.engraving.as_deref()),
            total: format_currency(order.value.value()),
            down_payment: order
                .down_payment
                .map(|amount| format_currency(amount.value())),
            pending: format_currency(pending_amount(order.value, order.down_payment)),
            payment_status: order.payment_status.label().to_string(),
            payment_method: order.payment_method.clone(),
            delivery_date: format_date(&order.delivery_date, offset),
            observations: non_blank(Some(&order.observations)),
            created_at: format_date_time(order.created_at.as_deref(), offset, now),
            created_by: order.created_by.clone(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let mut lines = vec![format!(
            "{} - Comprovante do pedido #{}",
            self.store_name, self.reference
        )];

        if let Some(message) = &self.extra_message {
            lines.push(String::new());
            lines.push(message.clone());
        }

        lines.push(String::new());
        lines.push(format!("Cliente: {}", self.client_name));
        lines.push(format!("Telefone: {}", self.phone));
        lines.push(format!("Descrição: {}", self.description));

        if let Some(ring_size) = &self.ring_size {
            lines.push(format!("Tamanho do anel: {ring_size}"));
        }
        if let Some(engraving) = &self.engraving {
            lines.push(format!("Gravação: {engraving}"));
        }

        lines.push(format!("Valor total: R$ {}", self.total));
        if let Some(down_payment) = &self.down_payment {
            lines.push(format!("Entrada: R$ {down_payment}"));
        }
        lines.push(format!("Restante: R$ {}", self.pending));
        lines.push(format!("Pagamento: {} ({})", self.payment_status, self.payment_method));
        lines.push(format!("Entrega: {}", self.delivery_date));

        if let Some(observations) = &self.observations {
            lines.push(format!("Observações: {observations}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Registrado em {} por {}",
            self.created_at, self.created_by
        ));

        lines.join("\n")
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
