//! Slackgate CLI - sign, verify and inspect Slack requests offline.
//!
//! # Usage
//!
//! ```bash
//! # Produce the signature Slack would send for a body
//! slackgate sign --timestamp 1531420618 --body-file request.txt
//!
//! # Check a captured request (body from stdin)
//! slackgate verify --timestamp 1531420618 --signature v0=a2114d... < request.txt
//!
//! # Show the slash command fields in a form body
//! slackgate parse --body-file request.txt
//!
//! # Validate server configuration from the environment
//! slackgate check-config
//! ```
//!
//! # Commands
//!
//! - `sign` - Compute a `v0=` signature
//! - `verify` - Check a signature, exit code 1 when invalid
//! - `parse` - Print a slash command payload as JSON
//! - `check-config` - Load and validate server configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use slackgate_core::BufferedBody;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "slackgate")]
#[command(author, version, about = "Slackgate CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the signature for a request body
    Sign {
        /// Request timestamp, exactly as sent in the header
        #[arg(short, long)]
        timestamp: String,

        /// Inline request body
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the request body from a file (stdin if neither is given)
        #[arg(short = 'f', long)]
        body_file: Option<PathBuf>,

        /// Environment variable holding the signing secret
        #[arg(long, default_value = commands::DEFAULT_SECRET_ENV)]
        secret_env: String,
    },
    /// Verify a presented signature
    Verify {
        /// Request timestamp, exactly as sent in the header
        #[arg(short, long)]
        timestamp: String,

        /// Presented signature (`v0=<hex>`)
        #[arg(short, long)]
        signature: String,

        /// Read the request body from a file (stdin if omitted)
        #[arg(short = 'f', long)]
        body_file: Option<PathBuf>,

        /// Environment variable holding the signing secret
        #[arg(long, default_value = commands::DEFAULT_SECRET_ENV)]
        secret_env: String,
    },
    /// Print the slash command fields of a form body as JSON
    Parse {
        /// Read the request body from a file (stdin if omitted)
        #[arg(short = 'f', long)]
        body_file: Option<PathBuf>,
    },
    /// Load and validate server configuration from the environment
    CheckConfig,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Commands::Sign {
            timestamp,
            body,
            body_file,
            secret_env,
        } => {
            let secret = commands::load_secret(&secret_env)?;
            let body = match body {
                Some(inline) => BufferedBody::from(inline.into_bytes()),
                None => commands::read_body(body_file.as_deref())?,
            };
            println!("{}", commands::sign::run(&secret, &timestamp, &body)?);
        }
        Commands::Verify {
            timestamp,
            signature,
            body_file,
            secret_env,
        } => {
            let secret = commands::load_secret(&secret_env)?;
            let reader = commands::open_body(body_file.as_deref())?;
            let authentic = commands::verify::run(secret, &timestamp, &signature, reader)?;
            println!("{}", if authentic { "valid" } else { "invalid" });
            if !authentic {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Parse { body_file } => {
            let body = commands::read_body(body_file.as_deref())?;
            println!("{}", commands::parse::run(&body)?);
        }
        Commands::CheckConfig => {
            println!("{}", commands::config::check()?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
