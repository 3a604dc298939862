pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "tweet-api")]
#[command(about = "Tweet API - REST backend for tweets and user sessions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,

        #[arg(long, help = "Keep all data in process memory instead of Postgres")]
        in_memory: bool,
    },

    #[command(about = "Create the database tables and exit")]
    Migrate,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        in_memory: false,
    }) {
        Commands::Serve { port, in_memory } => {
            commands::serve::handle(config, port, in_memory).await
        }
        Commands::Migrate => commands::migrate::handle(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["tweet-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_flags() {
        let cli =
            Cli::try_parse_from(["tweet-api", "serve", "--port", "8080", "--in-memory"]).unwrap();
        match cli.command {
            Some(Commands::Serve { port, in_memory }) => {
                assert_eq!(port, Some(8080));
                assert!(in_memory);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn migrate_takes_no_args() {
        assert!(matches!(
            Cli::try_parse_from(["tweet-api", "migrate"]).unwrap().command,
            Some(Commands::Migrate)
        ));
        assert!(Cli::try_parse_from(["tweet-api", "migrate", "--port", "1"]).is_err());
    }
}
