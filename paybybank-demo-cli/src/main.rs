//! Pay-by-Bank Demo CLI
//!
//! Command-line interface for exercising the Pay-by-Bank workflow against the
//! processor. Each subcommand runs exactly one library operation and prints
//! its structured result.

use std::fmt;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "paybybank-demo")]
#[command(about = "Pay-by-Bank Demo CLI - Run signed workflow calls against the processor", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the raw JSON result only
    #[arg(long, global = true)]
    json: bool,
}

/// Credentials and endpoint, from flags or environment.
#[derive(Args, Default)]
struct ConnectionArgs {
    /// Processor API key
    #[arg(long, env = "PBB_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Processor API secret
    #[arg(long, env = "PBB_API_SECRET", global = true, hide_env_values = true)]
    api_secret: Option<String>,

    /// Merchant identifier
    #[arg(long, env = "PBB_MERCHANT_ID", global = true)]
    merchant_id: Option<String>,

    /// Terminal identifier
    #[arg(long, env = "PBB_TERMINAL_ID", global = true)]
    terminal_id: Option<String>,

    /// Processor base URL (defaults to the certification environment)
    #[arg(long, env = "PBB_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PBB_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,
}

impl fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ConnectionArgs")
            .field("api_key", &redacted(&self.api_key))
            .field("api_secret", &redacted(&self.api_secret))
            .field("merchant_id", &self.merchant_id)
            .field("terminal_id", &self.terminal_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show that the demo service is running
    Health,

    /// Check that the credentials authenticate (no money moves)
    TestConnection,

    /// Step 1: create a customer profile
    CreateCustomer {
        /// Merchant customer id (generated when omitted)
        #[arg(long)]
        merchant_customer_id: Option<String>,
    },

    /// Step 2: fetch provider credentials for the client-side SDK
    ProviderCredentials {
        /// Provider customer id from step 1
        #[arg(long)]
        provider_customer_id: Option<String>,

        /// SDK configuration id
        #[arg(long)]
        config_id: Option<String>,
    },

    /// Step 3: detokenize a nonce
    NonceInquiry {
        /// Nonce produced by the client-side SDK
        nonce: String,

        /// Merchant customer id
        #[arg(long)]
        merchant_customer_id: Option<String>,

        /// Provider customer id
        #[arg(long)]
        provider_customer_id: Option<String>,
    },

    /// Step 4: submit a charge
    Charge {
        /// Amount in USD (defaults to 1.00)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Payment source as JSON (defaults to a Pay-by-Bank token)
        #[arg(long)]
        source: Option<String>,

        /// Authorize only, do not capture
        #[arg(long)]
        no_capture: bool,

        /// Merchant customer id
        #[arg(long)]
        merchant_customer_id: Option<String>,

        /// Provider customer id
        #[arg(long)]
        provider_customer_id: Option<String>,
    },

    /// Send a signed request to any processor endpoint
    Proxy {
        /// Endpoint path (defaults to the charges endpoint)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// HTTP method: GET or POST
        #[arg(short, long, default_value = "POST")]
        method: String,

        /// Payload as JSON
        #[arg(short, long)]
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("paybybank_demo=debug,paybybank_lib=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("paybybank_demo=info,paybybank_lib=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    if let Commands::Health = cli.command {
        commands::health::run(cli.json)?;
        return Ok(());
    }

    let session = commands::Session::new(&cli.connection, cli.json)?;

    // Dispatch commands
    let success = match cli.command {
        Commands::Health => true,
        Commands::TestConnection => commands::connection::run(&session).await?,
        Commands::CreateCustomer {
            merchant_customer_id,
        } => commands::workflow::create_customer(&session, merchant_customer_id).await?,
        Commands::ProviderCredentials {
            provider_customer_id,
            config_id,
        } => {
            commands::workflow::provider_credentials(&session, provider_customer_id, config_id)
                .await?
        }
        Commands::NonceInquiry {
            nonce,
            merchant_customer_id,
            provider_customer_id,
        } => {
            commands::workflow::nonce_inquiry(
                &session,
                nonce,
                merchant_customer_id,
                provider_customer_id,
            )
            .await?
        }
        Commands::Charge {
            amount,
            source,
            no_capture,
            merchant_customer_id,
            provider_customer_id,
        } => {
            commands::workflow::charge(
                &session,
                commands::workflow::ChargeArgs {
                    amount,
                    source,
                    capture: !no_capture,
                    merchant_customer_id,
                    provider_customer_id,
                },
            )
            .await?
        }
        Commands::Proxy {
            endpoint,
            method,
            payload,
        } => commands::proxy::run(&session, endpoint, method, payload).await?,
    };

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
