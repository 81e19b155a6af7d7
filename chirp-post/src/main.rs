//! chirp-post - Sign and post a status update from a file

use clap::Parser;
use libchirp::logging::{LogFormat, LoggingConfig};
use libchirp::platforms::twitter::{TwitterClient, DEFAULT_ENDPOINT};
use libchirp::platforms::Platform;
use libchirp::{Credentials, PostOutcome, Result, StatusUpdate};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "chirp-post")]
#[command(about = "Sign and post a status update over OAuth 1.0a", long_about = None)]
struct Cli {
    /// File containing the status text
    #[arg(default_value = "progress_update.txt")]
    file: String,

    /// Credentials file (KEY=VALUE lines)
    #[arg(short, long, default_value = ".env")]
    credentials: String,

    /// Status update endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; diagnostics go to stdout, tracing to stderr.
    let format = std::env::var("CHIRP_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);
    let level = if cli.verbose { "debug" } else { "error" };
    LoggingConfig::new(format, level.to_string(), cli.verbose).init();

    match run(cli).await {
        Ok(outcome) if outcome.is_success() => {
            println!("Status posted successfully!");
        }
        Ok(_) => {
            // A non-200 response is reported, not raised; still exit
            // non-zero so scripts can detect the failed post.
            println!("Failed to post status.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<PostOutcome> {
    let credentials = Credentials::load(&cli.credentials)?;
    debug!(path = %cli.credentials, "loaded credentials");

    let update = StatusUpdate::from_file(&cli.file)?;

    let client = TwitterClient::with_endpoint(credentials, &cli.endpoint);
    client.validate_content(&update.content)?;

    let signed = client.sign_status(&update.content);

    println!("URL: {}", client.endpoint());
    println!("Status text: {}", update.content);
    println!("Base string: {}", signed.base_string);
    println!("Authorization header: {}", signed.authorization);

    let outcome = client.send(&signed, &update.content).await?;

    println!("Status code: {}", outcome.status_code);
    println!("Response: {}", outcome.body);

    Ok(outcome)
}
