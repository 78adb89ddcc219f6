use anyhow::{Context, Result};

use clap::Parser;

use ecash_chronik::ChronikClient;
use ecash_payout::{PayoutConfig, PayoutSender, SendRequest};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Send RMZ tokens from the reward wallet.
#[derive(Parser, Debug)]
#[command(name = "rmz-send", version, about = "Send an RMZ SLP token payout on eCash")]
struct Cli {
    /// Recipient `ecash:` address
    recipient: String,
    /// Amount in token atoms
    atoms: u64,
    /// Build and sign but print the raw transaction instead of broadcasting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    logging_init();

    let cli = Cli::parse();

    let config = PayoutConfig::from_env().context("loading configuration")?;
    let client = ChronikClient::new(config.chronik_config())?;
    let sender = PayoutSender::new(config, client.clone(), client);
    let request = SendRequest::new(cli.recipient, cli.atoms);

    if cli.dry_run {
        let payout = sender.build(&request).await?;
        println!("{}", payout.tx.to_hex());
    } else {
        let txid = sender.send(&request).await?;
        println!("{txid}");
    }
    Ok(())
}

fn logging_init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
