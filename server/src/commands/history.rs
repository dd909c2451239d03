//! # History Command
//!
//! File: server/src/commands/history.rs
//! Author: Motiv Developers
//!
//! `motiv history` prints the cached transcript; `--clear` empties it.
//!
use crate::client::transcript::TranscriptStore;
use crate::core::config::{ClientArgs, ClientConfig};
use crate::core::error::Result;
use crate::models::Role;
use clap::Args;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Delete the cached transcript instead of printing it.
    #[arg(long)]
    pub clear: bool,
}

pub fn handle_history(args: HistoryArgs, client_args: &ClientArgs) -> Result<()> {
    let config = ClientConfig::from_args(client_args)?;
    let transcript = TranscriptStore::in_dir(&config.history_dir);

    if args.clear {
        transcript.clear_chat_history();
        println!("Chat history cleared.");
        return Ok(());
    }

    let history = transcript.load_chat_history();
    if history.is_empty() {
        println!("No chat history yet.");
        return Ok(());
    }
    for message in history {
        let speaker = match message.role {
            Role::User => "you",
            Role::Assistant => "ai",
            Role::System => "system",
        };
        println!("[{}] {}", speaker, message.content);
    }
    Ok(())
}
