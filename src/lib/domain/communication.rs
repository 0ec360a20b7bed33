//! Outgoing communication

pub mod mailer;
