//! urlsign - mint keys, sign URLs, and verify signed URLs.
//!
//! This binary wires the `urlsign-auth` library to the command line for
//! operators provisioning clients and for debugging signatures by hand.
//!
//! # Usage
//!
//! ```text
//! urlsign keygen
//! urlsign sign 'https://api.example.com/v1/geocode?q=Paris&client=acme' --key <KEY>
//! urlsign check '<SIGNED-URL>'
//! KEY_REPOSITORY=/etc/urlsign/keys urlsign verify '<SIGNED-URL>' --json
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KEY_REPOSITORY` | `keys.txt` | Key repository used by `verify` |
//! | `KEY_LENGTH` | `20` | Bytes of randomness in keys minted by `keygen` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use urlsign_core::UrlSignConfig;

/// Tool version reported by `--version` and in logs.
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(
    name = "urlsign",
    version,
    about = "Mint keys, sign URLs, and verify signed URLs",
    long_about = "Shared-secret HMAC-SHA1 URL signing.\n\n\
        A signed URL carries a client parameter naming its key and a final\n\
        signature parameter computed over the URL's path and query."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON instead of plain text
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a fresh URL-safe base64 key
    Keygen(KeygenArgs),

    /// Append a signature to a URL
    Sign(SignArgs),

    /// Check that a signed URL is well formed without verifying it
    Check(CheckArgs),

    /// Verify a signed URL against the key repository
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct KeygenArgs {
    /// Bytes of randomness in the key (overrides KEY_LENGTH)
    #[arg(long)]
    length: Option<usize>,
}

#[derive(Args, Debug)]
struct SignArgs {
    /// URL to sign; must contain a client parameter
    url: String,

    /// URL-safe base64 key of the client
    #[arg(long)]
    key: String,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Signed URL to check
    url: String,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Signed URL to verify
    url: String,

    /// Key repository file (overrides KEY_REPOSITORY)
    #[arg(long)]
    repository: Option<PathBuf>,
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout carries only command output.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Run the selected subcommand and return what it prints.
fn run(cli: &Cli, config: &UrlSignConfig) -> Result<String> {
    match &cli.command {
        Command::Keygen(args) => commands::keygen(args.length.unwrap_or(config.key_length)),
        Command::Sign(args) => commands::sign(&args.url, &args.key),
        Command::Check(args) => commands::check(&args.url, cli.json),
        Command::Verify(args) => {
            let repository = args
                .repository
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.key_repository));
            commands::verify(&args.url, &repository, cli.json)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = UrlSignConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level)?;

    debug!(
        key_repository = %config.key_repository,
        key_length = config.key_length,
        version = VERSION,
        "starting urlsign",
    );

    let output = run(&cli, &config)?;
    println!("{output}");

    Ok(())
}
