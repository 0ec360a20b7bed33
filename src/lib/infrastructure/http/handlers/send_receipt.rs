//! Send receipt handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::receipts::{
        Order, ReceiptContent, ReceiptRequest, ReceiptRequestError, ReceiptService, Recipients,
    },
    infrastructure::http::{
        errors::ApiError,
        state::AppState,
    },
};

/// One recipient or a list of recipients
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipientList {
    /// A single address
    One(String),

    /// Several addresses
    Many(Vec<String>),
}

impl From<RecipientList> for Vec<String> {
    fn from(list: RecipientList) -> Self {
        match list {
            RecipientList::One(email) => vec![email],
            RecipientList::Many(emails) => emails,
        }
    }
}

/// Send receipt request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendReceiptBody {
    /// Recipient address, or a list of addresses
    #[schema(value_type = Option<Vec<String>>, example = json!(["maria@example.com"]))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to_emails: Option<RecipientList>,

    /// Single recipient, used when `toEmails` is absent
    #[schema(example = "maria@example.com")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipient_email: Option<String>,

    /// Email subject
    #[schema(example = "Comprovante do seu pedido")]
    #[serde(default)]
    subject: Option<String>,

    /// Message shown above the receipt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extra_message: Option<String>,

    /// Send a copy to the sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    send_copy: Option<bool>,

    /// Order to render the receipt from
    #[schema(value_type = Option<Object>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<Order>,

    /// Pre-rendered receipt HTML, used when `order` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receipt_html: Option<String>,
}

impl TryFrom<SendReceiptBody> for ReceiptRequest {
    type Error = ReceiptRequestError;

    fn try_from(body: SendReceiptBody) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();

        let uses_recipient_email = body.recipient_email.is_some();
        let recipients = body
            .to_emails
            .map(|list| Recipients::new(Vec::from(list)))
            .filter(|recipients| !recipients.is_empty())
            .unwrap_or_else(|| Recipients::new(body.recipient_email));
        if recipients.is_empty() {
            missing.push(if uses_recipient_email {
                "recipientEmail"
            } else {
                "toEmails"
            });
        }

        let subject = body
            .subject
            .filter(|subject| !subject.trim().is_empty());
        if subject.is_none() {
            missing.push("subject");
        }

        let content = match (body.order, body.receipt_html) {
            (Some(order), _) => Some(ReceiptContent::Order(Box::new(order))),
            (None, Some(html)) if !html.trim().is_empty() => Some(ReceiptContent::Html(html)),
            _ => None,
        };
        if content.is_none() {
            missing.push("order or receiptHtml");
        }

        let (Some(subject), Some(content), true) = (subject, content, missing.is_empty()) else {
            return Err(ReceiptRequestError::MissingFields(missing));
        };

        let mut request = ReceiptRequest::new(recipients, &subject, content);
        request.extra_message = body
            .extra_message
            .filter(|message| !message.trim().is_empty());
        request.send_copy = body.send_copy.unwrap_or(false);

        Ok(request)
    }
}

/// Send receipt response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendReceiptResponse {
    success: bool,
}

/// Send a receipt email
#[utoipa::path(
    post,
    operation_id = "send_receipt",
    tag = "Receipts",
    path = "/api/send-receipt",
    request_body = SendReceiptBody,
    responses(
        (status = 200, description = "Receipt sent", body = SendReceiptResponse, example = json!({ "success": true })),
        (status = 400, description = "Missing required fields", body = ErrorResponse, example = json!({ "error": "Missing required fields: subject" })),
        (status = 500, description = "Mail service not configured or unavailable", body = ErrorResponse, example = json!({ "error": "Could not send receipt email" })),
    )
)]
pub async fn handler<R: ReceiptService>(
    State(state): State<AppState<R>>,
    request: Result<Json<SendReceiptBody>, JsonRejection>,
) -> Result<Json<SendReceiptResponse>, ApiError> {
    let Json(body) = request?;
    let receipt: ReceiptRequest = body.try_into()?;

    state.receipts.send_receipt(receipt).await?;

    Ok(Json(SendReceiptResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    use crate::{
        domain::{
            communication::mailer::{tests::MockMailer, MailerError},
            receipts::{tests::MockReceiptService, ReceiptConfig, ReceiptServiceImpl, SendReceiptError},
        },
        infrastructure::{
            email::emailjs::{EmailJsConfig, EmailJsMailer},
            http::{
                errors::ErrorResponse, router, state::tests::test_state, state::AppState,
                HttpServerConfig,
            },
        },
    };

    use super::*;

    fn server<R: ReceiptService>(state: AppState<R>) -> TestServer {
        TestServer::new(router(state, &HttpServerConfig::default())).unwrap()
    }

    fn emailjs_state(mock_server: &MockServer) -> AppState<ReceiptServiceImpl<EmailJsMailer>> {
        let mailer = EmailJsMailer::new(EmailJsConfig {
            service_id: Some("service_jamp".to_string()),
            template_id: Some("template_receipt".to_string()),
            public_key: Some("public-key".to_string()),
            private_key: Some("private-key".to_string()),
            api_url: format!("{}/api/v1.0/email/send", mock_server.uri()),
        });

        AppState::new(ReceiptServiceImpl::new(
            Arc::new(mailer),
            ReceiptConfig::default(),
        ))
    }

    fn html_body() -> serde_json::Value {
        json!({
            "recipientEmail": "maria@example.com",
            "subject": "Comprovante",
            "extraMessage": "Obrigado!",
            "sendCopy": true,
            "receiptHtml": "<p>Recibo</p>"
        })
    }

    #[tokio::test]
    async fn test_send_receipt_success() -> TestResult {
        let mut receipts = MockReceiptService::new();

        receipts
            .expect_send_receipt()
            .times(1)
            .withf(|request| {
                request.recipients.joined() == "maria@example.com"
                    && request.subject == "Comprovante"
                    && request.extra_message.as_deref() == Some("Obrigado!")
                    && request.send_copy
                    && request.content == ReceiptContent::Html("<p>Recibo</p>".to_string())
            })
            .returning(|_| Ok(()));

        let response = server(test_state(Some(receipts)))
            .post("/api/send-receipt")
            .json(&html_body())
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_the_service() -> TestResult {
        let mut receipts = MockReceiptService::new();
        receipts.expect_send_receipt().times(0);

        let response = server(test_state(Some(receipts)))
            .post("/api/send-receipt")
            .json(&json!({}))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json.error,
            "Missing required fields: toEmails, subject, order or receiptHtml"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_fields_count_as_missing() -> TestResult {
        let mut receipts = MockReceiptService::new();
        receipts.expect_send_receipt().times(0);

        let response = server(test_state(Some(receipts)))
            .post("/api/send-receipt")
            .json(&json!({
                "recipientEmail": "",
                "subject": "   ",
                "receiptHtml": "<p>Recibo</p>"
            }))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(json.error, "Missing required fields: recipientEmail, subject");

        Ok(())
    }

    #[tokio::test]
    async fn test_each_missing_field_is_a_bad_request() -> TestResult {
        for field in ["recipientEmail", "subject", "receiptHtml"] {
            let mut receipts = MockReceiptService::new();
            receipts.expect_send_receipt().times(0);

            let mut body = html_body();
            if let Some(body) = body.as_object_mut() {
                body.remove(field);
            }

            let response = server(test_state(Some(receipts)))
                .post("/api/send-receipt")
                .json(&body)
                .await;

            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{field}");
        }

        Ok(())
    }

    #[test]
    fn test_empty_to_emails_falls_back_to_recipient_email() -> TestResult {
        for to_emails in [json!([]), json!(""), json!(["  "])] {
            let body: SendReceiptBody = serde_json::from_value(json!({
                "toEmails": to_emails,
                "recipientEmail": "a@x.com",
                "subject": "Comprovante",
                "receiptHtml": "<p>Recibo</p>"
            }))?;

            let request = ReceiptRequest::try_from(body)?;

            assert_eq!(request.recipients.joined(), "a@x.com");
        }

        Ok(())
    }

    #[test]
    fn test_to_emails_wins_over_recipient_email() -> TestResult {
        let body: SendReceiptBody = serde_json::from_value(json!({
            "toEmails": ["b@x.com"],
            "recipientEmail": "a@x.com",
            "subject": "Comprovante",
            "receiptHtml": "<p>Recibo</p>"
        }))?;

        let request = ReceiptRequest::try_from(body)?;

        assert_eq!(request.recipients.joined(), "b@x.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_bad_request() -> TestResult {
        let mut receipts = MockReceiptService::new();
        receipts.expect_send_receipt().times(0);

        let response = server(test_state(Some(receipts)))
            .post("/api/send-receipt")
            .json(&json!({ "toEmails": 42, "subject": "Recibo", "receiptHtml": "<p></p>" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_internal_error() -> TestResult {
        let mut receipts = MockReceiptService::new();

        receipts.expect_send_receipt().times(1).returning(|_| {
            Err(SendReceiptError::CouldNotSendEmail(MailerError::SendError(
                anyhow::anyhow!("connection refused"),
            )))
        });

        let response = server(test_state(Some(receipts)))
            .post("/api/send-receipt")
            .json(&html_body())
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.error, "Could not send receipt email");

        Ok(())
    }

    #[tokio::test]
    async fn test_order_recipients_are_joined_for_the_transport() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(1)
            .withf(|message| {
                message.to == "a@x.com, b@x.com" && message.html_body.contains("R$ 600,00")
            })
            .returning(|_| Ok(()));

        let state = AppState::new(ReceiptServiceImpl::new(
            Arc::new(mailer),
            ReceiptConfig::default(),
        ));

        let response = server(state)
            .post("/api/send-receipt")
            .json(&json!({
                "toEmails": ["a@x.com", "b@x.com"],
                "subject": "Seu pedido",
                "order": {
                    "id": "665f1c2ab1e4d9a1c3f0a9b7",
                    "clientName": "Maria Souza",
                    "value": 1000,
                    "downPayment": 400,
                    "deliveryDate": "2026-10-05",
                    "paymentStatus": "partial"
                }
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));

        Ok(())
    }

    #[tokio::test]
    async fn test_emailjs_upstream_success() -> TestResult {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = server(emailjs_state(&mock_server))
            .post("/api/send-receipt")
            .json(&html_body())
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));

        Ok(())
    }

    #[tokio::test]
    async fn test_emailjs_upstream_failure() -> TestResult {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = server(emailjs_state(&mock_server))
            .post("/api/send-receipt")
            .json(&html_body())
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!json.error.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_emailjs_missing_credentials_make_no_request() -> TestResult {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mailer = EmailJsMailer::new(EmailJsConfig {
            api_url: format!("{}/api/v1.0/email/send", mock_server.uri()),
            ..Default::default()
        });
        let state = AppState::new(ReceiptServiceImpl::new(
            Arc::new(mailer),
            ReceiptConfig::default(),
        ));

        let response = server(state)
            .post("/api/send-receipt")
            .json(&html_body())
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.error, "Mail service is not configured on the server");

        Ok(())
    }
}
