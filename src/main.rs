mod config;
mod error;
mod export;
mod logging;
mod ports;
mod services;
mod spotify_rs;
mod terminal;
#[cfg(test)]
mod test_utils;
mod ytmusic_rs;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config,
    export::{ExportOptions, run},
    logging::init_tracing,
    spotify_rs::auth::SpotifyCredentials,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "PLAYLIST_PORTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Console log level (default: off)
    #[arg(long, default_value = "off", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: String,

    /// Path to log file
    #[arg(long, env = "PLAYLIST_PORTER_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Match Spotify playlists against YouTube Music and save the result
    Export {
        /// Where to write the JSON result (default: data.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How many YouTube Music searches to run at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// Spotify app client id
        #[arg(long, env = "SPOTIFY__CLIENT_ID", hide_env_values = true)]
        spotify_client_id: String,

        /// Spotify app client secret
        #[arg(long, env = "SPOTIFY__CLIENT_SECRET", hide_env_values = true)]
        spotify_client_secret: String,

        /// Refresh token of the Spotify account to export from
        #[arg(long, env = "SPOTIFY__REFRESH_TOKEN", hide_env_values = true)]
        spotify_refresh_token: String,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Spotify credentials may live in .env
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_file.as_deref(), &args.log_file_level)?;

    tracing::debug!("Playlist porter starting");

    match args.command {
        Commands::Export {
            output,
            concurrency,
            spotify_client_id,
            spotify_client_secret,
            spotify_refresh_token,
        } => {
            let config = match &args.config {
                Some(path) => Config::from_file(path),
                None => Config::load(),
            }
            .wrap_err("Failed to load playlist-porter config")?;
            tracing::debug!("Loaded config: {:?}", config);

            run(ExportOptions {
                credentials: SpotifyCredentials {
                    client_id: spotify_client_id,
                    client_secret: spotify_client_secret,
                    refresh_token: spotify_refresh_token,
                },
                output: output.unwrap_or(config.output),
                concurrency: concurrency.unwrap_or(config.concurrency),
                policy: config.matching,
            })
            .await?;
            tracing::info!("Export completed successfully");
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                tracing::debug!("Creating default config");
                let path = Config::create_default()?;
                println!("{}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}
