#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Receipt mailer HTTP server

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use receipt_mailer::{
    domain::receipts::{ReceiptConfig, ReceiptServiceImpl},
    infrastructure::{
        email::{MailTransport, MailerConfig},
        http::{state::AppState, HttpServer, HttpServerConfig},
    },
};
use tracing::warn;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The mail transport configuration
    #[clap(flatten)]
    pub mailer: MailerConfig,

    /// The receipt rendering configuration
    #[clap(flatten)]
    pub receipt: ReceiptConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    if let Err(e) = dotenv {
        warn!("no .env file loaded: {e}");
    }

    let args = Args::parse();

    args.mailer.warn_missing();
    if args.receipt.logo_url().is_none() {
        warn!("environment variable RECEIPT_LOGO_URL is not set");
    }

    let mailer = Arc::new(MailTransport::new(args.mailer));
    let state = AppState::new(ReceiptServiceImpl::new(mailer, args.receipt));

    HttpServer::new(state, args.server).await?.run().await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use receipt_mailer::infrastructure::email::MailTransportKind;

    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_land_in_their_own_fields() -> testresult::TestResult {
        let args = Args::try_parse_from([
            "server",
            "--port",
            "8080",
            "--smtp-port",
            "465",
            "--mail-transport",
            "emailjs",
            "--utc-offset-hours",
            "-5",
        ])?;

        assert_eq!(args.server.port, 8080);
        assert_eq!(args.mailer.smtp.port, 465);
        assert_eq!(args.mailer.transport, MailTransportKind::EmailJs);
        assert_eq!(args.receipt.utc_offset_hours, -5);

        Ok(())
    }
}
