use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use typedeck_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "typedeck")]
#[command(author, version, about = "Typewriter text presentations for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck to play (shorthand for `play`)
    deck: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a deck in the terminal
    Play {
        /// Deck file (TOML)
        deck: PathBuf,
    },
    /// Validate a deck file and report its blocks
    Check {
        /// Deck file (TOML)
        deck: PathBuf,
    },
    /// Print every block's fully revealed text
    Dump {
        /// Deck file (TOML)
        deck: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging; stderr keeps the alternate screen and `dump`
    // output clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { deck }) => commands::play::run(&config, &deck),
        Some(Commands::Check { deck }) => commands::check::run(&config, &deck),
        Some(Commands::Dump { deck }) => commands::dump::run(&deck),
        None => match cli.deck {
            Some(deck) => commands::play::run(&config, &deck),
            None => {
                eprintln!("usage: typedeck <DECK> (or `typedeck help`)");
                std::process::exit(2);
            }
        },
    }
}
