//! # Motiv Main Entry Point
//!
//! File: server/src/main.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Entry point of the `motiv` binary. It:
//! - Loads a `.env` file (if any) so environment-backed flags can see it
//! - Parses command-line arguments using Clap
//! - Sets up logging based on verbosity flags or `RUST_LOG`
//! - Routes execution to the matching command handler
//!
//! ## Examples
//!
//! ```bash
//! # Run the server on port 3000, serving the current directory
//! OPENAI_API_KEY=sk-... motiv serve
//!
//! # Talk to it from another terminal
//! motiv ask "Beri aku semangat hari ini"
//! motiv quote
//! motiv share twitter --text "Dream big" --url https://example.com
//! motiv history
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod client;
mod commands;
mod core;
mod models;
mod services;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "motiv",
    about = "Motiv: AI prompt relay, motivational quotes and share links",
    long_about = "Run the Motiv HTTP server, or talk to a running one from the command line.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    client: crate::core::config::ClientArgs,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Send a prompt to the server and print the reply.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Print a random motivational quote.
    #[command(alias = "q")]
    Quote,
    /// Print a share link for a social platform.
    Share(commands::share::ShareArgs),
    /// Show or clear the local chat history.
    History(commands::history::HistoryArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal.
    let dotenv_path = dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
        Commands::Ask(args) => commands::ask::handle_ask(args, &cli.client).await,
        Commands::Quote => commands::quote::handle_quote(&cli.client).await,
        Commands::Share(args) => commands::share::handle_share(args, &cli.client).await,
        Commands::History(args) => commands::history::handle_history(args, &cli.client),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
