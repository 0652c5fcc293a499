/// Encore Ctl - inspect and manage saved playback states
use anyhow::Context;
use clap::{Parser, Subcommand};
use encore_core::{StateRepository, Timestamp};
use encore_ctl::{commands, CtlConfig};
use encore_storage::StateStore;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore-ctl")]
#[command(about = "Inspect and manage Encore saved playback states", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./encore.toml when present)
    #[arg(short, long, env = "ENCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List titled bookmarks, newest first
    List,
    /// Show a saved state and its playlist
    Show {
        /// Timestamp of the saved state (newest when omitted)
        timestamp: Option<Timestamp>,
    },
    /// Delete a saved state and its playlist
    Remove {
        /// Timestamp of the saved state
        timestamp: Timestamp,
    },
    /// Copy a saved state into a titled bookmark
    Bookmark {
        /// Bookmark title
        title: String,
        /// Timestamp to copy from (newest when omitted)
        #[arg(long)]
        from: Option<Timestamp>,
    },
    /// Print a saved state as JSON
    Export {
        /// Timestamp of the saved state (newest when omitted)
        timestamp: Option<Timestamp>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Preview artist-fair shuffle picks for a saved playlist
    Shuffle {
        /// Timestamp of the saved state (newest when omitted)
        timestamp: Option<Timestamp>,
        /// Number of picks
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        /// Seed for a reproducible preview
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_ctl=info,encore_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CtlConfig::load(cli.config.as_deref())?;
    config.validate()?;

    if let Commands::Config = cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let store = StateStore::open(&config.storage.database_url, config.storage.max_connections)
        .await
        .with_context(|| format!("opening {}", config.storage.database_url))?;
    tracing::debug!("Database connected");

    match cli.command {
        Commands::List => {
            let records = store.list_bookmarks().await?;
            print!("{}", commands::format_bookmarks(&records));
        }
        Commands::Show { timestamp } => {
            let saved = commands::load_saved_state(&store, timestamp).await?;
            print!("{}", commands::format_saved_state(&saved));
        }
        Commands::Remove { timestamp } => {
            let record = commands::remove_saved_state(&store, timestamp).await?;
            println!("Removed '{}' ({})", record.title, record.timestamp);
        }
        Commands::Bookmark { title, from } => {
            let timestamp =
                commands::bookmark_saved_state(&store, from, &title, &config.autosave.title)
                    .await?;
            println!("Saved bookmark '{title}' at {timestamp}");
        }
        Commands::Export { timestamp, output } => {
            let saved = commands::load_saved_state(&store, timestamp).await?;
            let json = commands::export_json(&saved)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Exported saved state");
                }
                None => println!("{json}"),
            }
        }
        Commands::Shuffle {
            timestamp,
            count,
            seed,
        } => {
            let saved = commands::load_saved_state(&store, timestamp).await?;
            let picks = commands::shuffle_preview(&saved.playlist, count, seed)?;
            for position in picks {
                if let Some(track) = saved.playlist.get(position) {
                    println!("{:>4}  {} - {}", position + 1, track.artist, track.display_name());
                }
            }
        }
        Commands::Config => {}
    }

    store.pool().close().await;
    Ok(())
}
