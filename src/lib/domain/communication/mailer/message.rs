//! Email message

/// Email message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// The recipients of the email, joined with `", "`
    pub to: String,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: String,

    /// The plain text body of the email, when one was rendered
    pub plain_body: Option<String>,

    /// Free text the sender attached to the receipt
    pub extra_message: Option<String>,

    /// Whether the sender asked for a copy
    pub send_copy: bool,
}
