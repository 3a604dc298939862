use clap::Parser;
use tracing_subscriber::EnvFilter;
use tweet_api::cli::{self, Cli};
use tweet_api::is_development;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, token secrets, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tweet_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let config = tweet_api::config::config();
    tracing::info!("Starting Tweet API in {:?} mode", config.environment);
    if is_development!() {
        tracing::warn!(
            "Using development token secrets; set APP_ENV=production for real deployments"
        );
    }

    if let Err(e) = cli::run(cli, config.clone()).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
