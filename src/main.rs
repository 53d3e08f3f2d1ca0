//! `fintech-cli`: command-line smoke check against a Fintech API deployment.
//!
//! ```text
//! fintech-cli account <account-id>
//! fintech-cli validate <key-hash>
//! fintech-cli hash <raw-key>
//! fintech-cli record <account-id> <amount> <currency> <description> [reference-id]
//! ```

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use fintech_client::app::hash_api_key;
use fintech_client::{ClientConfig, FintechClient};

const USAGE: &str = "usage: fintech-cli <account|validate|hash|record> [args...]";

/// CLI configuration
struct Config {
    api_key: String,
    /// API base URL (optional - library default if not set)
    base_url: Option<String>,
    /// Request timeout in seconds (optional - no timeout if not set)
    timeout_secs: Option<u64>,
}

impl Config {
    fn from_env() -> Result<Self> {
        let api_key = env::var("FINTECH_API_KEY").context("FINTECH_API_KEY not set")?;
        if api_key.is_empty() {
            bail!("FINTECH_API_KEY environment variable is empty");
        }

        let base_url = env::var("FINTECH_BASE_URL").ok().filter(|u| !u.is_empty());

        let timeout_secs = match env::var("FINTECH_TIMEOUT_SECS") {
            Ok(v) => Some(
                v.parse::<u64>()
                    .with_context(|| format!("FINTECH_TIMEOUT_SECS is not a number: {v}"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            api_key,
            base_url,
            timeout_secs,
        })
    }

    fn into_client_config(self) -> Result<ClientConfig> {
        let mut builder = ClientConfig::builder(self.api_key)
            .user_agent(concat!("fintech-cli/", env!("CARGO_PKG_VERSION")));
        if let Some(url) = self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().context("Invalid client configuration")
    }
}

/// Parsed subcommand
enum Command {
    Account(String),
    Validate(String),
    Hash(String),
    Record {
        account_id: String,
        amount: i64,
        currency: String,
        description: String,
        reference_id: String,
    },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!(USAGE);
        };

        match (name.as_str(), rest) {
            ("account", [id]) => Ok(Self::Account(id.clone())),
            ("validate", [hash]) => Ok(Self::Validate(hash.clone())),
            ("hash", [raw]) => Ok(Self::Hash(raw.clone())),
            ("record", [account_id, amount, currency, description, tail @ ..])
                if tail.len() <= 1 =>
            {
                let amount = amount
                    .parse::<i64>()
                    .with_context(|| format!("amount must be an integer, got {amount}"))?;
                let reference_id = tail
                    .first()
                    .cloned()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                Ok(Self::Record {
                    account_id: account_id.clone(),
                    amount,
                    currency: currency.clone(),
                    description: description.clone(),
                    reference_id,
                })
            }
            _ => bail!(USAGE),
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fintech_client=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build the client from the environment
fn connect() -> Result<FintechClient> {
    let config = Config::from_env()?.into_client_config()?;
    info!(base_url = %config.base_url(), "fintech-cli v{}", env!("CARGO_PKG_VERSION"));
    FintechClient::from_config(config).context("Failed to build client")
}

/// Run one command. `connect` is only invoked by commands that reach the API.
async fn run<F>(command: Command, connect: F) -> Result<()>
where
    F: FnOnce() -> Result<FintechClient>,
{
    match command {
        Command::Hash(raw) => {
            println!("{}", hash_api_key(&raw));
        }
        Command::Account(id) => {
            let client = connect()?;
            let account = client
                .ledger
                .get_account(&id)
                .await
                .with_context(|| format!("get_account({id}) failed"))?;
            print_json(&account)?;
        }
        Command::Validate(hash) => {
            let client = connect()?;
            let result = client
                .auth
                .validate_key(&hash)
                .await
                .context("validate_key failed")?;
            if !result.is_valid() {
                warn!("Key reported as invalid");
            }
            print_json(&result)?;
        }
        Command::Record {
            account_id,
            amount,
            currency,
            description,
            reference_id,
        } => {
            let client = connect()?;
            info!(reference_id = %reference_id, "Recording transaction");
            let tx = client
                .ledger
                .record_transaction(&account_id, amount, &currency, &description, &reference_id)
                .await
                .context("record_transaction failed")?;
            print_json(&tx)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    run(command, connect).await
}
