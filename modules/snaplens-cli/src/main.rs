use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use snaplens_cli::{render_text, DisplaySlots, LookupOutcome, LookupRequest};
use snaplens_client::SnapClient;
use snaplens_common::{Config, ProfileRecord, SnapLensError};

#[derive(Parser)]
#[command(name = "snaplens")]
#[command(about = "Look up public Snapchat profiles via RapidAPI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a profile by username, @handle or profile URL
    Lookup {
        /// "cheyenne123.4", "@cheyenne123.4" or "https://www.snapchat.com/add/cheyenne123.4"
        handle: String,

        /// RapidAPI key (defaults to RAPIDAPI_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Print the normalized profile record as JSON
        #[arg(long)]
        json: bool,

        /// Append the raw API response
        #[arg(long)]
        raw: bool,
    },

    /// Print the JSON schema of the profile record
    Schema,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("snaplens=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup {
            handle,
            api_key,
            json,
            raw,
        } => lookup(&handle, api_key, json, raw).await,
        Commands::Schema => {
            let schema = schemars::schema_for!(ProfileRecord);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn lookup(input: &str, api_key: Option<String>, json: bool, raw: bool) -> Result<ExitCode> {
    let config = Config::from_env()?;
    let api_key = api_key.or_else(|| config.api_key.clone());

    let request = match LookupRequest::new(input, api_key.as_deref()) {
        Ok(request) => request,
        Err(err @ (SnapLensError::MissingApiKey | SnapLensError::MissingHandle)) => {
            eprintln!("{err}");
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err.into()),
    };

    let client = SnapClient::from_config(&config, &request.api_key)?;
    let result = request.run(&client).await;
    let slots = DisplaySlots::from_lookup(&request.handle, &result);

    match (json, result.outcome.profile()) {
        (true, Some(profile)) => {
            println!("{}", serde_json::to_string_pretty(profile)?);
            if raw {
                eprintln!("{}", result.raw);
            }
        }
        (true, None) => {
            eprintln!("{}", slots.display_name);
            if raw {
                eprintln!("{}", result.raw);
            }
        }
        (false, _) => print!("{}", render_text(&slots, raw)),
    }

    match result.outcome {
        LookupOutcome::Found(_) => {
            info!(handle = request.handle.as_str(), "Lookup complete");
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::from(1)),
    }
}
